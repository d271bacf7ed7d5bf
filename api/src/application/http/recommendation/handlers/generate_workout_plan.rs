use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;
use vitalcoach_core::domain::recommendation::{
    GenerateWorkoutPlanInput, Recommendation, RecommendationService, entities::WorkoutPlan,
};

use crate::application::http::{
    recommendation::validators::WorkoutPlanValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct GenerateWorkoutPlanResponse {
    pub data: Recommendation<WorkoutPlan>,
}

#[utoipa::path(
    post,
    path = "/workout-plans",
    tag = "recommendation",
    summary = "Generate a workout plan",
    description = "Generates a workout plan covering the selected days with at least three exercises per day.",
    request_body = WorkoutPlanValidator,
    responses(
        (status = 200, description = "Validated recommendation", body = GenerateWorkoutPlanResponse),
        (status = 400, description = "Unknown day or meal", body = ErrorResponse),
        (status = 422, description = "Request body failed validation", body = ErrorResponse),
        (status = 502, description = "Every attempt failed", body = ErrorResponse)
    )
)]
pub async fn generate_workout_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<WorkoutPlanValidator>,
) -> Result<Response<GenerateWorkoutPlanResponse>, ApiError> {
    let input = GenerateWorkoutPlanInput::try_from(payload).map_err(ApiError::from)?;

    let recommendation = state
        .service
        .generate_workout_plan(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateWorkoutPlanResponse {
        data: recommendation,
    }))
}
