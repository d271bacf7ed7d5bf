use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;
use vitalcoach_core::domain::recommendation::{
    GenerateDietPlanInput, Recommendation, RecommendationService, entities::DietPlan,
};

use crate::application::http::{
    recommendation::validators::DietPlanValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct GenerateDietPlanResponse {
    pub data: Recommendation<DietPlan>,
}

#[utoipa::path(
    post,
    path = "/diet-plans",
    tag = "recommendation",
    summary = "Generate a diet plan",
    description = "Generates a diet plan covering exactly the selected days and meals.",
    request_body = DietPlanValidator,
    responses(
        (status = 200, description = "Validated recommendation", body = GenerateDietPlanResponse),
        (status = 400, description = "Unknown day or meal", body = ErrorResponse),
        (status = 422, description = "Request body failed validation", body = ErrorResponse),
        (status = 502, description = "Every attempt failed", body = ErrorResponse)
    )
)]
pub async fn generate_diet_plan(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<DietPlanValidator>,
) -> Result<Response<GenerateDietPlanResponse>, ApiError> {
    let input = GenerateDietPlanInput::try_from(payload).map_err(ApiError::from)?;

    let recommendation = state
        .service
        .generate_diet_plan(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateDietPlanResponse {
        data: recommendation,
    }))
}
