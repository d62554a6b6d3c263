use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::{timestamp, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionReport {
    message: String,
    mongo_uri: &'static str,
}

/// GET /api/test-mongo - Probe the document store
///
/// Reports whether MONGODB_URI is set without echoing it.
///
/// Output:
/// ```json
/// {
///   "success": true,
///   "message": "Connected to MongoDB successfully",
///   "timestamp": "2026-01-01T00:00:00.000Z",
///   "mongoUri": "Configured"
/// }
/// ```
pub async fn test_mongo(State(state): State<AppState>) -> Response {
    let mongo_uri = if state.mongo_uri_configured {
        "Configured"
    } else {
        "Not configured"
    };

    match state.documents.test_connection().await {
        Ok(status) if status.success => {
            tracing::info!("Document store connection test passed");
            ApiResponse::success(ConnectionReport {
                message: status.message,
                mongo_uri,
            })
            .into_response()
        }
        Ok(status) => {
            tracing::warn!("Document store connection test failed: {}", status.message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": status.message,
                    "timestamp": timestamp(),
                    "mongoUri": mongo_uri,
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Document store connection test errored: {}", e);
            ApiError::internal_with_details("MongoDB connection test failed", e).into_response()
        }
    }
}
