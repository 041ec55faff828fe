use crate::model::HealthResponse;
use axum::Json;

/// Liveness only; the repository is not consulted.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}
