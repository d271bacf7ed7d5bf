use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    llm::ports::LLMGateway,
    pipeline::{
        orchestrator::{RetryOrchestrator, RetryPolicy},
        validator::{validate_body_analysis, validate_diet_plan, validate_workout_plan},
    },
    recommendation::{
        entities::{BodyAnalysisResult, DietPlan, Recommendation, WorkoutPlan},
        ports::{PromptBuilder, RecommendationService},
        value_objects::{
            AnalyzeBodyInput, GenerateDietPlanInput, GenerateWorkoutPlanInput, RecommendationKind,
        },
    },
};

impl<LLM, PB> RecommendationService for Service<LLM, PB>
where
    LLM: LLMGateway,
    PB: PromptBuilder,
{
    #[instrument(skip(self, input), fields(kind = "body_analysis"))]
    async fn analyze_body(
        &self,
        input: AnalyzeBodyInput,
    ) -> Result<Recommendation<BodyAnalysisResult>, CoreError> {
        input.validate()?;

        let prompt = self.prompt_builder.body_analysis_prompt(&input);
        let policy = RetryPolicy::fallback(
            self.retry.body_analysis_max_attempts,
            self.retry.attempt_timeout,
            BodyAnalysisResult::fallback(),
        );

        let mut outcome = RetryOrchestrator::new(self.llm_gateway.as_ref())
            .run(
                RecommendationKind::BodyAnalysis,
                &prompt,
                policy,
                validate_body_analysis,
            )
            .await?;

        if !outcome.is_fallback {
            outcome.value.mark_model_answer();
        }

        Ok(Recommendation::new(RecommendationKind::BodyAnalysis, outcome))
    }

    #[instrument(skip(self, input), fields(kind = "diet_plan", days = input.days.len()))]
    async fn generate_diet_plan(
        &self,
        input: GenerateDietPlanInput,
    ) -> Result<Recommendation<DietPlan>, CoreError> {
        let ctx = input.selection_context()?;

        let prompt = self.prompt_builder.diet_plan_prompt(&input);
        let policy = RetryPolicy::raise(
            self.retry.diet_plan_max_attempts,
            self.retry.attempt_timeout,
        );

        let outcome = RetryOrchestrator::new(self.llm_gateway.as_ref())
            .run(
                RecommendationKind::DietPlan,
                &prompt,
                policy,
                |plan: &DietPlan| validate_diet_plan(plan, &ctx),
            )
            .await?;

        Ok(Recommendation::new(RecommendationKind::DietPlan, outcome))
    }

    #[instrument(skip(self, input), fields(kind = "workout_plan", days = input.days.len()))]
    async fn generate_workout_plan(
        &self,
        input: GenerateWorkoutPlanInput,
    ) -> Result<Recommendation<WorkoutPlan>, CoreError> {
        let ctx = input.selection_context()?;

        let prompt = self.prompt_builder.workout_plan_prompt(&input);
        let policy = RetryPolicy::raise(
            self.retry.workout_plan_max_attempts,
            self.retry.attempt_timeout,
        );

        let outcome = RetryOrchestrator::new(self.llm_gateway.as_ref())
            .run(
                RecommendationKind::WorkoutPlan,
                &prompt,
                policy,
                |plan: &WorkoutPlan| validate_workout_plan(plan, &ctx),
            )
            .await?;

        Ok(Recommendation::new(RecommendationKind::WorkoutPlan, outcome))
    }
}
