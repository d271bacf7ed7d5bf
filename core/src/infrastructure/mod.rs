pub mod llm;
pub mod prompt;
