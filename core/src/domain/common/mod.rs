use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

/// Upper bound applied to every configured attempt count.
pub const MAX_ATTEMPTS_CEILING: u32 = 5;

#[derive(Clone, Debug)]
pub struct VitalCoachConfig {
    pub llm: LLMConfig,
    pub retry: RetryConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for `response_format: {"type": "json_object"}`.
    pub json_mode: bool,
}

/// Attempt budgets per recommendation flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub body_analysis_max_attempts: u32,
    pub diet_plan_max_attempts: u32,
    pub workout_plan_max_attempts: u32,
    pub attempt_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            body_analysis_max_attempts: 2,
            diet_plan_max_attempts: 3,
            workout_plan_max_attempts: 3,
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

/// Clamps an attempt budget into `1..=MAX_ATTEMPTS_CEILING`.
pub fn clamp_attempts(max_attempts: u32) -> u32 {
    max_attempts.clamp(1, MAX_ATTEMPTS_CEILING)
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
