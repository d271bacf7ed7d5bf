use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_body::{__path_analyze_body, analyze_body},
    generate_diet_plan::{__path_generate_diet_plan, generate_diet_plan},
    generate_workout_plan::{__path_generate_workout_plan, generate_workout_plan},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_body, generate_diet_plan, generate_workout_plan))]
pub struct RecommendationApiDoc;

pub fn recommendation_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/recommendations/body-analysis"),
            post(analyze_body),
        )
        .route(
            &format!("{root_path}/recommendations/diet-plans"),
            post(generate_diet_plan),
        )
        .route(
            &format!("{root_path}/recommendations/workout-plans"),
            post(generate_workout_plan),
        )
}
