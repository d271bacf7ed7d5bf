use crate::{
    domain::common::{VitalCoachConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::OpenAICompatibleClient, prompt::TemplatePromptBuilder},
};

pub type VitalCoachService = Service<OpenAICompatibleClient, TemplatePromptBuilder>;

pub fn create_service(config: VitalCoachConfig) -> Result<VitalCoachService, CoreError> {
    if config.llm.api_key.trim().is_empty() {
        return Err(CoreError::Invalid("LLM API key is not configured".to_string()));
    }
    if config.llm.base_url.trim().is_empty() {
        return Err(CoreError::Invalid("LLM base URL is not configured".to_string()));
    }

    tracing::info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        json_mode = config.llm.json_mode,
        "LLM gateway configured"
    );

    Ok(Service::new(
        OpenAICompatibleClient::new(config.llm),
        TemplatePromptBuilder::new(),
        config.retry,
    ))
}
