use serde_json::{json, Value};

use crate::middleware::{ApiResponse, LegacyCaller};

// Billing has no backing integration yet; both endpoints return fixed payloads
// once the caller is known.

/// GET /api/payments/history
///
/// Output: `{ "payments": [] }`
pub async fn payment_history(LegacyCaller(identity): LegacyCaller) -> ApiResponse<Value> {
    tracing::debug!(user = %identity, "Payment history requested");
    ApiResponse::bare(json!({ "payments": [] }))
}

/// GET /api/subscription/status
///
/// Output: `{ "plan": null, "status": "inactive", "nextBillingDate": null }`
pub async fn subscription_status(LegacyCaller(identity): LegacyCaller) -> ApiResponse<Value> {
    tracing::debug!(user = %identity, "Subscription status requested");
    ApiResponse::bare(json!({
        "plan": null,
        "status": "inactive",
        "nextBillingDate": null,
    }))
}
