use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::identity::Identity;
use crate::middleware::{ApiResponse, ApiResult, Caller};
use crate::services::Report;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReportList {
    pub reports: Vec<Report>,
    pub count: usize,
}

async fn load_reports(state: &AppState, identity: &Identity) -> Result<ReportList, ApiError> {
    tracing::info!(user = %identity, "Fetching reports");

    let reports = state
        .documents
        .get_user_analyses(identity)
        .await
        .map_err(|e| {
            tracing::error!(user = %identity, "Report lookup failed: {}", e);
            ApiError::internal_with_details("Failed to fetch reports", e)
        })?;

    let count = reports.len();
    tracing::info!(user = %identity, count, "Reports fetched");

    Ok(ReportList { reports, count })
}

/// GET /api/reports/mongo - Caller's analyses, newest first
///
/// Output: `{ "success": true, "reports": [...], "count": 3, "timestamp": "..." }`
pub async fn mongo_reports(State(state): State<AppState>, Caller(identity): Caller) -> ApiResult<ReportList> {
    load_reports(&state, &identity).await.map(ApiResponse::success)
}

/// GET /api/reports/user - Same listing without the timestamp
///
/// Output: `{ "reports": [...], "success": true, "count": 3 }`
pub async fn user_reports(State(state): State<AppState>, Caller(identity): Caller) -> ApiResult<ReportList> {
    load_reports(&state, &identity)
        .await
        .map(ApiResponse::success_without_timestamp)
}
