// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Handlers only ever surface these three classes.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidInput(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error
    InternalServerError {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            ApiError::InternalServerError { details, .. } => details.as_deref(),
            _ => None,
        }
    }

    /// Standard error envelope: `{success: false, error, details?}`
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.message(),
        });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }
        body
    }

    /// Error-only envelope used by the billing endpoints: `{error, details?}`
    pub fn to_legacy_json(&self) -> Value {
        let mut body = json!({ "error": self.message() });
        if let Some(details) = self.details() {
            body["details"] = json!(details);
        }
        body
    }
}

// Static constructor methods
impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// 500 carrying the underlying collaborator error text
    pub fn internal_with_details(message: impl Into<String>, details: impl ToString) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            details: Some(details.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

/// Renders the wrapped error with the error-only envelope
#[derive(Debug)]
pub struct Legacy(pub ApiError);

impl From<ApiError> for Legacy {
    fn from(err: ApiError) -> Self {
        Legacy(err)
    }
}

impl IntoResponse for Legacy {
    fn into_response(self) -> axum::response::Response {
        (self.0.status_code(), Json(self.0.to_legacy_json())).into_response()
    }
}
