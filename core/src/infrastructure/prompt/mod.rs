pub mod template_prompt_builder;

pub use template_prompt_builder::TemplatePromptBuilder;
