use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::domain::{
    common::{clamp_attempts, entities::app_errors::CoreError},
    llm::{
        entities::{GatewayError, Prompt, RawModelResponse},
        ports::LLMGateway,
    },
    pipeline::{
        decoder::{DecodeShape, decode},
        escalation::escalate,
        extractor::extract,
        validator::ValidationReport,
    },
    recommendation::value_objects::RecommendationKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    GatewayFailure { error: GatewayError },
    ExtractionFailure,
    DecodeFailure { reason: String },
    ValidationFailure,
}

/// One pass of gateway call, extraction, decoding and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    /// 1-based.
    pub index: u32,
    pub outcome: AttemptOutcome,
    /// Set whenever validation ran and found something, including extra keys
    /// on a successful attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
}

impl AttemptRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Success
    }

    pub fn failure_reason(&self) -> String {
        match &self.outcome {
            AttemptOutcome::Success => "succeeded".to_string(),
            AttemptOutcome::GatewayFailure { error } => error.to_string(),
            AttemptOutcome::ExtractionFailure => "no JSON object found in model output".to_string(),
            AttemptOutcome::DecodeFailure { reason } => reason.clone(),
            AttemptOutcome::ValidationFailure => match &self.report {
                Some(report) => format!("invalid result ({report})"),
                None => "invalid result".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalBehavior<T> {
    /// Return this value once every attempt failed.
    Fallback(T),
    /// Fail with [`CoreError::RecommendationFailed`].
    RaiseError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy<T> {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub terminal: TerminalBehavior<T>,
}

impl<T> RetryPolicy<T> {
    pub fn fallback(max_attempts: u32, attempt_timeout: Duration, value: T) -> Self {
        Self {
            max_attempts: clamp_attempts(max_attempts),
            attempt_timeout,
            terminal: TerminalBehavior::Fallback(value),
        }
    }

    pub fn raise(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: clamp_attempts(max_attempts),
            attempt_timeout,
            terminal: TerminalBehavior::RaiseError,
        }
    }
}

/// Value produced by a run together with its attempt log.
#[derive(Debug, Clone, PartialEq)]
pub struct Orchestrated<T> {
    pub value: T,
    pub raw_response: Option<String>,
    pub attempts: Vec<AttemptRecord>,
    pub is_fallback: bool,
}

/// Drives the attempt loop for one request.
pub struct RetryOrchestrator<'a, G: LLMGateway> {
    gateway: &'a G,
    cancellation: Option<watch::Receiver<bool>>,
}

impl<'a, G: LLMGateway> RetryOrchestrator<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            cancellation: None,
        }
    }

    /// Aborts the in-flight call and stops retrying once `true` is sent.
    pub fn with_cancellation(mut self, cancellation: watch::Receiver<bool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// Runs attempts sequentially until one decodes into a valid `T`.
    ///
    /// Attempt 1 sends `prompt` as is; later attempts send it escalated with
    /// corrections derived from the previous attempt. A cancelled call ends
    /// the loop early and the terminal behavior applies to what was recorded.
    pub async fn run<T, V>(
        &self,
        kind: RecommendationKind,
        prompt: &Prompt,
        policy: RetryPolicy<T>,
        validate: V,
    ) -> Result<Orchestrated<T>, CoreError>
    where
        T: DecodeShape + Send,
        V: Fn(&T) -> ValidationReport + Send + Sync,
    {
        let max_attempts = clamp_attempts(policy.max_attempts);
        let mut cancellation = self.cancellation.clone();
        let mut attempts: Vec<AttemptRecord> = Vec::with_capacity(max_attempts as usize);
        let mut raw_response = None;

        for index in 1..=max_attempts {
            let current = match attempts.last() {
                Some(last) => escalate(prompt, last, index),
                None => prompt.clone(),
            };

            let response = self
                .call(&current, policy.attempt_timeout, &mut cancellation)
                .await;

            let (record, value) = match response {
                Err(error) => (
                    AttemptRecord {
                        index,
                        outcome: AttemptOutcome::GatewayFailure { error },
                        report: None,
                        completion_tokens: None,
                    },
                    None,
                ),
                Ok(response) => {
                    let completion_tokens = response.completion_tokens();
                    let (outcome, report, value) = evaluate(&response.content, &validate);
                    raw_response = Some(response.content);
                    (
                        AttemptRecord {
                            index,
                            outcome,
                            report,
                            completion_tokens,
                        },
                        value,
                    )
                }
            };

            if let Some(value) = value {
                tracing::info!(
                    kind = kind.as_str(),
                    attempt = index,
                    max_attempts,
                    "recommendation generated"
                );
                attempts.push(record);
                return Ok(Orchestrated {
                    value,
                    raw_response,
                    attempts,
                    is_fallback: false,
                });
            }

            tracing::warn!(
                kind = kind.as_str(),
                attempt = index,
                max_attempts,
                reason = %record.failure_reason(),
                "recommendation attempt failed"
            );

            let cancelled = matches!(
                record.outcome,
                AttemptOutcome::GatewayFailure {
                    error: GatewayError::Cancelled
                }
            );
            attempts.push(record);
            if cancelled {
                break;
            }
        }

        let attempt_count = attempts.len() as u32;
        let reason = attempts
            .last()
            .map(AttemptRecord::failure_reason)
            .unwrap_or_else(|| "no attempt was made".to_string());

        match policy.terminal {
            TerminalBehavior::Fallback(value) => {
                tracing::warn!(
                    kind = kind.as_str(),
                    attempts = attempt_count,
                    reason = %reason,
                    "attempts exhausted, returning fallback"
                );
                Ok(Orchestrated {
                    value,
                    raw_response,
                    attempts,
                    is_fallback: true,
                })
            }
            TerminalBehavior::RaiseError => {
                tracing::error!(
                    kind = kind.as_str(),
                    attempts = attempt_count,
                    reason = %reason,
                    "attempts exhausted"
                );
                Err(CoreError::RecommendationFailed {
                    kind,
                    attempts: attempt_count,
                    reason,
                })
            }
        }
    }

    async fn call(
        &self,
        prompt: &Prompt,
        attempt_timeout: Duration,
        cancellation: &mut Option<watch::Receiver<bool>>,
    ) -> Result<RawModelResponse, GatewayError> {
        if let Some(receiver) = cancellation.as_ref() {
            let already_cancelled = *receiver.borrow();
            if already_cancelled {
                return Err(GatewayError::Cancelled);
            }
        }

        let call = tokio::time::timeout(attempt_timeout, self.gateway.complete(prompt.to_request()));

        let Some(receiver) = cancellation.as_mut() else {
            return flatten_timeout(call.await, attempt_timeout);
        };

        tokio::select! {
            biased;
            _ = wait_for_cancel(receiver) => Err(GatewayError::Cancelled),
            result = call => flatten_timeout(result, attempt_timeout),
        }
    }
}

fn flatten_timeout(
    result: Result<Result<RawModelResponse, GatewayError>, tokio::time::error::Elapsed>,
    attempt_timeout: Duration,
) -> Result<RawModelResponse, GatewayError> {
    result.unwrap_or_else(|_| {
        Err(GatewayError::TimedOut {
            after_ms: u64::try_from(attempt_timeout.as_millis()).unwrap_or(u64::MAX),
        })
    })
}

async fn wait_for_cancel(receiver: &mut watch::Receiver<bool>) {
    let cancelled = receiver.wait_for(|cancelled| *cancelled).await.is_ok();
    if !cancelled {
        // sender dropped without cancelling
        std::future::pending::<()>().await;
    }
}

fn evaluate<T, V>(
    content: &str,
    validate: &V,
) -> (AttemptOutcome, Option<ValidationReport>, Option<T>)
where
    T: DecodeShape,
    V: Fn(&T) -> ValidationReport,
{
    let Some(json) = extract(content) else {
        return (AttemptOutcome::ExtractionFailure, None, None);
    };

    let value: T = match decode(&json) {
        Ok(value) => value,
        Err(err) => {
            return (
                AttemptOutcome::DecodeFailure {
                    reason: err.to_string(),
                },
                None,
                None,
            );
        }
    };

    let report = validate(&value);
    if !report.is_valid() {
        return (AttemptOutcome::ValidationFailure, Some(report), None);
    }

    let report = (!report.is_empty()).then_some(report);
    (AttemptOutcome::Success, report, Some(value))
}
