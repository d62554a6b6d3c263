use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Caller};
use crate::services::AnalyticsSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyticsPayload {
    pub analytics: AnalyticsSummary,
}

/// GET /api/analytics/mongo - Scan counters for the caller
///
/// Output: `{ "success": true, "analytics": {...}, "timestamp": "..." }`
pub async fn mongo_analytics(
    State(state): State<AppState>,
    Caller(identity): Caller,
) -> ApiResult<AnalyticsPayload> {
    tracing::info!(user = %identity, "Fetching analytics");

    let analytics = state
        .documents
        .get_user_analytics(&identity)
        .await
        .map_err(|e| {
            tracing::error!(user = %identity, "Analytics lookup failed: {}", e);
            ApiError::internal_with_details("Failed to fetch analytics", e)
        })?;

    tracing::info!(
        user = %identity,
        total_scans = analytics.total_scans,
        anomalies_detected = analytics.anomalies_detected,
        normal_scans = analytics.normal_scans,
        "Analytics fetched"
    );

    Ok(ApiResponse::success(AnalyticsPayload { analytics }))
}
