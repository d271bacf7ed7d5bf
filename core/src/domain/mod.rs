pub mod common;
pub mod llm;
pub mod pipeline;
pub mod recommendation;
