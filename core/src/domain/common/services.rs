use std::sync::Arc;

use crate::domain::{
    common::RetryConfig, llm::ports::LLMGateway, recommendation::ports::PromptBuilder,
};

/// Service container the recommendation use cases are implemented on.
pub struct Service<LLM, PB>
where
    LLM: LLMGateway,
    PB: PromptBuilder,
{
    pub(crate) llm_gateway: Arc<LLM>,
    pub(crate) prompt_builder: Arc<PB>,
    pub(crate) retry: RetryConfig,
}

impl<LLM, PB> Service<LLM, PB>
where
    LLM: LLMGateway,
    PB: PromptBuilder,
{
    pub fn new(llm_gateway: LLM, prompt_builder: PB, retry: RetryConfig) -> Self {
        Self {
            llm_gateway: Arc::new(llm_gateway),
            prompt_builder: Arc::new(prompt_builder),
            retry,
        }
    }
}

impl<LLM, PB> Clone for Service<LLM, PB>
where
    LLM: LLMGateway,
    PB: PromptBuilder,
{
    fn clone(&self) -> Self {
        Self {
            llm_gateway: Arc::clone(&self.llm_gateway),
            prompt_builder: Arc::clone(&self.prompt_builder),
            retry: self.retry.clone(),
        }
    }
}
