use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::pipeline::decoder::{Coercion, DecodeShape, FieldRule, field};

pub const ANALYSIS_METHOD_LLM: &str = "llm";
pub const ANALYSIS_METHOD_FALLBACK: &str = "fallback";
pub const UNCLASSIFIABLE_LABEL: &str = "unclassifiable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysisResult {
    pub label: String,
    pub summary: String,
    pub reasoning: String,
    pub tips: String,
    pub health_risk: String,
    pub muscle_balance: String,
    pub metabolic_health: String,
    pub body_composition: String,
    pub bmi_category: String,
    pub body_fat_category: String,
    pub visceral_fat_category: String,
    pub inbody_score: Option<i32>,
    pub analysis_method: String,
}

impl BodyAnalysisResult {
    /// Substitute returned when every attempt failed.
    pub fn fallback() -> Self {
        Self {
            label: UNCLASSIFIABLE_LABEL.to_string(),
            summary: "Your body type could not be classified automatically this time."
                .to_string(),
            reasoning: "The analysis service did not return a usable answer, so no \
                        classification was made from your measurements."
                .to_string(),
            tips: "Try the analysis again later. Your measurements were not changed."
                .to_string(),
            health_risk: "unknown".to_string(),
            muscle_balance: "unknown".to_string(),
            metabolic_health: "unknown".to_string(),
            body_composition: "unknown".to_string(),
            bmi_category: "unknown".to_string(),
            body_fat_category: "unknown".to_string(),
            visceral_fat_category: "unknown".to_string(),
            inbody_score: None,
            analysis_method: ANALYSIS_METHOD_FALLBACK.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.analysis_method == ANALYSIS_METHOD_FALLBACK
    }

    /// Stamps a genuine model answer so it cannot pass for the fallback.
    pub fn mark_model_answer(&mut self) {
        if self.analysis_method.trim().is_empty() || self.is_fallback() {
            self.analysis_method = ANALYSIS_METHOD_LLM.to_string();
        }
    }
}

impl DecodeShape for BodyAnalysisResult {
    const NAME: &'static str = "body analysis";
    const FIELDS: &'static [FieldRule] = &[
        field("label", Coercion::Text),
        field("summary", Coercion::Text),
        field("reasoning", Coercion::Text),
        field("tips", Coercion::Text),
        field("healthRisk", Coercion::Text),
        field("muscleBalance", Coercion::Text),
        field("metabolicHealth", Coercion::Text),
        field("bodyComposition", Coercion::Text),
        field("bmiCategory", Coercion::Text),
        field("bodyFatCategory", Coercion::Text),
        field("visceralFatCategory", Coercion::Text),
        field("inbodyScore", Coercion::OptionalInteger),
        field("analysisMethod", Coercion::Text),
    ];
}
