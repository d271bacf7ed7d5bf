use utoipa::OpenApi;

use crate::application::http::{health, recommendation::router::RecommendationApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VitalCoach API"
    ),
    paths(health::health),
    nest(
        (path = "/recommendations", api = RecommendationApiDoc),
    )
)]
pub struct ApiDoc;
