use std::time::Duration;

use clap::{ArgAction, Args as ClapArgs, Parser};
use vitalcoach_core::domain::common::{LLMConfig, RetryConfig, VitalCoachConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "vitalcoach-api", version, about = "VitalCoach recommendation API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub retry: RetryArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(
        long = "llm-base-url",
        env = "LLM_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,

    #[arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long = "llm-max-tokens", env = "LLM_MAX_TOKENS", default_value_t = 4096)]
    pub max_tokens: u32,

    #[arg(
        long = "llm-json-mode",
        env = "LLM_JSON_MODE",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub json_mode: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct RetryArgs {
    #[arg(
        long = "body-analysis-max-attempts",
        env = "BODY_ANALYSIS_MAX_ATTEMPTS",
        default_value_t = 2
    )]
    pub body_analysis_max_attempts: u32,

    #[arg(
        long = "diet-plan-max-attempts",
        env = "DIET_PLAN_MAX_ATTEMPTS",
        default_value_t = 3
    )]
    pub diet_plan_max_attempts: u32,

    #[arg(
        long = "workout-plan-max-attempts",
        env = "WORKOUT_PLAN_MAX_ATTEMPTS",
        default_value_t = 3
    )]
    pub workout_plan_max_attempts: u32,

    /// Deadline of a single LLM call, in seconds (1 to 600).
    #[arg(
        long = "llm-attempt-timeout",
        env = "LLM_ATTEMPT_TIMEOUT",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub attempt_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for VitalCoachConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                base_url: args.llm.base_url,
                api_key: args.llm.api_key,
                model: args.llm.model,
                temperature: args.llm.temperature,
                max_tokens: args.llm.max_tokens,
                json_mode: args.llm.json_mode,
            },
            retry: RetryConfig {
                body_analysis_max_attempts: args.retry.body_analysis_max_attempts,
                diet_plan_max_attempts: args.retry.diet_plan_max_attempts,
                workout_plan_max_attempts: args.retry.workout_plan_max_attempts,
                attempt_timeout: Duration::from_secs(args.retry.attempt_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_core_config() {
        let args = Args::try_parse_from(["vitalcoach-api", "--llm-api-key", "sk-test"]).unwrap();
        assert_eq!(args.server.port, 3333);

        let config = VitalCoachConfig::from(args);
        assert_eq!(config.llm.api_key, "sk-test");
        assert!(config.llm.json_mode);
        assert_eq!(config.retry, RetryConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "vitalcoach-api",
            "--llm-api-key",
            "sk-test",
            "--llm-json-mode",
            "false",
            "--workout-plan-max-attempts",
            "2",
            "--llm-attempt-timeout",
            "15",
            "--allowed-origins",
            "https://a.example,https://b.example",
        ])
        .unwrap();
        assert_eq!(args.server.allowed_origins.len(), 2);

        let config = VitalCoachConfig::from(args);
        assert!(!config.llm.json_mode);
        assert_eq!(config.retry.workout_plan_max_attempts, 2);
        assert_eq!(config.retry.attempt_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_attempt_timeout_is_rejected() {
        let result = Args::try_parse_from([
            "vitalcoach-api",
            "--llm-api-key",
            "sk-test",
            "--llm-attempt-timeout",
            "0",
        ]);

        assert!(result.is_err());
    }
}
