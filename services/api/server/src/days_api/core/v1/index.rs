use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Welcome to the Days API.")]
    pub message: String,
}

/// API welcome message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse),
    ),
    tag = "days",
)]
pub async fn handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Days API.".to_string(),
    })
}
