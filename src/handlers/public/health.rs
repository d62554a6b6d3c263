use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::middleware::{timestamp, ApiResponse};

/// GET /health - Liveness probe, no collaborator calls
pub async fn health() -> impl IntoResponse {
    ApiResponse::success(json!({ "status": "ok" }))
}

/// Fallback for paths with no handler
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Not found",
            "timestamp": timestamp(),
        })),
    )
}
