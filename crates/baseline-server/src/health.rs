use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// Liveness probe under the management prefix
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "UP" }))
}
