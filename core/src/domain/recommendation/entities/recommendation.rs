use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    pipeline::orchestrator::{AttemptRecord, Orchestrated},
    recommendation::value_objects::RecommendationKind,
};

/// Typed result of one recommendation request, ready to persist or return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation<T> {
    pub id: Uuid,
    pub kind: RecommendationKind,
    pub result: T,
    /// Model output of the last attempt that reached the gateway.
    pub raw_response: Option<String>,
    pub attempts: Vec<AttemptRecord>,
    pub is_fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl<T> Recommendation<T> {
    pub fn new(kind: RecommendationKind, outcome: Orchestrated<T>) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            kind,
            result: outcome.value,
            raw_response: outcome.raw_response,
            attempts: outcome.attempts,
            is_fallback: outcome.is_fallback,
            created_at: now,
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }
}
