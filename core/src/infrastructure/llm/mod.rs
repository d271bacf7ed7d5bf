pub mod openai_compatible;

pub use openai_compatible::OpenAICompatibleClient;
