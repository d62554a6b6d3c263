use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Caller};
use crate::state::AppState;
use crate::utils::format::truncate_text;

/// Upper bound on query length, in characters
pub const MAX_QUERY_CHARS: usize = 1000;

/// How much of the query text is allowed into logs
const LOGGED_QUERY_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct HealthQueryRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthQueryAnswer {
    pub query: String,
    pub response: String,
}

/// Non-blank and at most MAX_QUERY_CHARS characters
pub fn validate_query(query: &str) -> Result<(), ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::invalid_input("Query is required"));
    }
    if query.chars().count() > MAX_QUERY_CHARS {
        return Err(ApiError::invalid_input(format!(
            "Query must be at most {} characters",
            MAX_QUERY_CHARS
        )));
    }
    Ok(())
}

/// POST /api/health-query - Ask the AI integrator a health question
///
/// Input: `{ "query": "string (1..1000 chars)" }`
///
/// Output: `{ "success": true, "query": "...", "response": "...", "timestamp": "..." }`
pub async fn health_query(
    State(state): State<AppState>,
    Caller(identity): Caller,
    payload: Result<Json<HealthQueryRequest>, JsonRejection>,
) -> ApiResult<HealthQueryAnswer> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(user = %identity, "Rejected health query body: {}", rejection);
        ApiError::invalid_input("Request body must be JSON with a string 'query' field")
    })?;

    let query = request
        .query
        .ok_or_else(|| ApiError::invalid_input("Query is required"))?;
    validate_query(&query)?;

    tracing::info!(
        user = %identity,
        query = %truncate_text(&query, LOGGED_QUERY_CHARS),
        "Processing health query"
    );

    let response = state
        .analyzer
        .analyze_health_query(&query, &identity)
        .await
        .map_err(|e| {
            tracing::error!(user = %identity, "Health query failed: {}", e);
            ApiError::internal_with_details("Failed to process health query", e)
        })?;

    tracing::info!(user = %identity, response_chars = response.chars().count(), "Health query answered");

    Ok(ApiResponse::success(HealthQueryAnswer { query, response }))
}
