// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use uuid::Uuid;

use crate::middleware::response::ApiResponse;

/// HTTP API error, rendered as a failure envelope with the matching status
#[derive(Debug)]
pub enum ApiError {
    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
        }
    }

    /// Diagnostic sent in the envelope's `error` member, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::InternalServerError { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Convert to the response envelope
    pub fn to_envelope(&self) -> ApiResponse<()> {
        ApiResponse::failure(self.message(), self.detail().map(str::to_string))
    }
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            detail: None,
        }
    }

    /// Infrastructure failure. The cause is always logged under a fresh
    /// reference id; clients get the raw text only when `expose` is set,
    /// otherwise the reference.
    pub fn internal_failure(message: impl Into<String>, cause: &dyn Display, expose: bool) -> Self {
        let message = message.into();
        let reference = Uuid::new_v4();
        tracing::error!(%reference, "{}: {}", message, cause);

        let detail = if expose {
            cause.to_string()
        } else {
            format!("internal error reference {}", reference)
        };

        ApiError::InternalServerError {
            message,
            detail: Some(detail),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}
