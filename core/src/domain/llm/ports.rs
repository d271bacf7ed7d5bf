use crate::domain::llm::entities::{CompletionRequest, GatewayError, RawModelResponse};

/// Chat-completion gateway the recommendation pipeline talks to.
///
/// Implementations turn provider-level problems (transport errors, non-2xx
/// statuses, `error` payloads, empty `choices`) into a [`GatewayError`]; a
/// returned [`RawModelResponse`] always carries non-empty content.
#[cfg_attr(test, mockall::automock)]
pub trait LLMGateway: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<RawModelResponse, GatewayError>> + Send;
}
