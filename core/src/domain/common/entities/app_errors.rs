use thiserror::Error;

use crate::domain::recommendation::value_objects::RecommendationKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("{kind} generation failed after {attempts} attempts: {reason}")]
    RecommendationFailed {
        kind: RecommendationKind,
        attempts: u32,
        reason: String,
    },
}
