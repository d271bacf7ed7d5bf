use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    common::LLMConfig,
    llm::{
        entities::{ChatMessage, CompletionRequest, GatewayError, RawModelResponse, TokenUsage},
        ports::LLMGateway,
    },
};

/// Chat-completions client for any OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    config: LLMConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_raw_response(self) -> Result<RawModelResponse, GatewayError> {
        if let Some(error) = self.error.filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(GatewayError::Provider { message });
        }

        let choice = self.choices.into_iter().next().ok_or(GatewayError::NoChoices)?;
        let content = choice
            .message
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(RawModelResponse {
            content,
            usage: self.usage,
        })
    }
}

/// Classifies a 2xx response body; `null` and blank bodies count as empty.
fn parse_completion_body(body: &str) -> Result<RawModelResponse, GatewayError> {
    if body.trim().is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    let response: Option<ChatCompletionResponse> =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidBody {
            message: e.to_string(),
        })?;

    response
        .ok_or(GatewayError::EmptyResponse)?
        .into_raw_response()
}

impl OpenAICompatibleClient {
    pub fn new(config: LLMConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn call_chat_completions(
        &self,
        request: ChatCompletionRequest<'_>,
    ) -> Result<RawModelResponse, GatewayError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("LLM API request failed: {}", e);
                GatewayError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read LLM response body: {}", e);
            GatewayError::InvalidBody {
                message: e.to_string(),
            }
        })?;

        if !status.is_success() {
            tracing::error!("LLM API error: {} - {}", status, body);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion_body(&body).inspect_err(|e| {
            tracing::error!("Unusable LLM response: {}", e);
        })
    }
}

impl LLMGateway for OpenAICompatibleClient {
    async fn complete(&self, request: CompletionRequest) -> Result<RawModelResponse, GatewayError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: self.config.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        self.call_chat_completions(body).await
    }
}
