use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;
use vitalcoach_core::domain::recommendation::{
    AnalyzeBodyInput, Recommendation, RecommendationService, entities::BodyAnalysisResult,
};

use crate::application::http::{
    recommendation::validators::AnalyzeBodyValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct AnalyzeBodyResponse {
    pub data: Recommendation<BodyAnalysisResult>,
}

#[utoipa::path(
    post,
    path = "/body-analysis",
    tag = "recommendation",
    summary = "Analyze body composition",
    description = "Classifies a body composition measurement with the LLM. Falls back to an unclassified result when every attempt fails.",
    request_body = AnalyzeBodyValidator,
    responses(
        (status = 200, description = "Recommendation, possibly the fallback result", body = AnalyzeBodyResponse),
        (status = 422, description = "Request body failed validation", body = ErrorResponse)
    )
)]
pub async fn analyze_body(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeBodyValidator>,
) -> Result<Response<AnalyzeBodyResponse>, ApiError> {
    let recommendation = state
        .service
        .analyze_body(AnalyzeBodyInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeBodyResponse {
        data: recommendation,
    }))
}
