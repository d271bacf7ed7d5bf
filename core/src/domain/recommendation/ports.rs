use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::entities::Prompt,
    recommendation::{
        entities::{BodyAnalysisResult, DietPlan, Recommendation, WorkoutPlan},
        value_objects::{AnalyzeBodyInput, GenerateDietPlanInput, GenerateWorkoutPlanInput},
    },
};

/// Recommendation use cases exposed to the calling layer.
#[cfg_attr(test, mockall::automock)]
pub trait RecommendationService: Send + Sync {
    /// Never fails because of the model: an exhausted run yields the labeled
    /// fallback result.
    fn analyze_body(
        &self,
        input: AnalyzeBodyInput,
    ) -> impl Future<Output = Result<Recommendation<BodyAnalysisResult>, CoreError>> + Send;

    fn generate_diet_plan(
        &self,
        input: GenerateDietPlanInput,
    ) -> impl Future<Output = Result<Recommendation<DietPlan>, CoreError>> + Send;

    fn generate_workout_plan(
        &self,
        input: GenerateWorkoutPlanInput,
    ) -> impl Future<Output = Result<Recommendation<WorkoutPlan>, CoreError>> + Send;
}

/// Produces the first-attempt prompt of each flow.
#[cfg_attr(test, mockall::automock)]
pub trait PromptBuilder: Send + Sync {
    fn body_analysis_prompt(&self, input: &AnalyzeBodyInput) -> Prompt;

    fn diet_plan_prompt(&self, input: &GenerateDietPlanInput) -> Prompt;

    fn workout_plan_prompt(&self, input: &GenerateWorkoutPlanInput) -> Prompt;
}
