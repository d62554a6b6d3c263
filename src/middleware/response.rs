use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

/// ISO-8601 UTC timestamp with millisecond precision
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Which envelope keys get merged into the serialized payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Envelope {
    /// `success: true` plus `timestamp`
    Full,
    /// `success: true` only
    SuccessOnly,
    /// payload as-is
    Bare,
}

/// Wrapper for handler payloads that merges the success envelope into them.
///
/// The payload must serialize to a JSON object; its fields sit alongside
/// `success` and `timestamp` rather than under a `data` key.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    envelope: Envelope,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{success: true, ...data, timestamp}`
    pub fn success(data: T) -> Self {
        Self {
            data,
            envelope: Envelope::Full,
        }
    }

    /// `{success: true, ...data}`
    pub fn success_without_timestamp(data: T) -> Self {
        Self {
            data,
            envelope: Envelope::SuccessOnly,
        }
    }

    /// `{...data}`
    pub fn bare(data: T) -> Self {
        Self {
            data,
            envelope: Envelope::Bare,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut body = match serde_json::to_value(&self.data) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::error!("Response payload is not a JSON object: {}", other);
                return failed_serialization();
            }
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return failed_serialization();
            }
        };

        if self.envelope != Envelope::Bare {
            body.insert("success".to_string(), Value::Bool(true));
        }
        if self.envelope == Envelope::Full {
            body.insert("timestamp".to_string(), Value::String(timestamp()));
        }

        (StatusCode::OK, Json(Value::Object(body))).into_response()
    }
}

fn failed_serialization() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Failed to serialize response data"
        })),
    )
        .into_response()
}

// Convenience type alias
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
