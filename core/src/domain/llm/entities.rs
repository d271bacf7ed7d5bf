use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Prompt produced for one recommendation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// Flow-specific sentence appended to escalated prompts.
    pub corrective_hint: Option<String>,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            corrective_hint: None,
        }
    }

    pub fn with_corrective_hint(mut self, hint: impl Into<String>) -> Self {
        self.corrective_hint = Some(hint.into());
        self
    }

    pub fn to_request(&self) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system(self.system.clone()),
                ChatMessage::user(self.user.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Full textual answer of one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

impl RawModelResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn completion_tokens(&self) -> Option<u32> {
        self.usage.as_ref().and_then(|usage| usage.completion_tokens)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatewayError {
    #[error("request to the LLM provider failed: {message}")]
    Transport { message: String },

    #[error("LLM provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM provider response could not be read: {message}")]
    InvalidBody { message: String },

    #[error("LLM provider reported an error: {message}")]
    Provider { message: String },

    #[error("LLM provider returned an empty response")]
    EmptyResponse,

    #[error("LLM provider returned no choices")]
    NoChoices,

    #[error("LLM call timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },

    #[error("LLM call was cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_to_request_orders_system_first() {
        let prompt = Prompt::new("be precise", "plan my week");
        let request = prompt.to_request();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[1].content, "plan my week");
    }

    #[test]
    fn test_gateway_error_serializes_with_kind_tag() {
        let value = serde_json::to_value(GatewayError::TimedOut { after_ms: 1500 }).unwrap();
        assert_eq!(value["kind"], "timed_out");
        assert_eq!(value["after_ms"], 1500);
    }
}
