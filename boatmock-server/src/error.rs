//! API error types with IntoResponse
//!
//! Every error renders as `{"error": "<message>"}` with the matching status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use boatmock_core::GatewayError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Client sent nothing usable (400)
    BadRequest { message: String },

    /// Requested asset does not exist (404)
    NotFound { message: &'static str },

    /// Unexpected fault (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest { message } | Self::Internal { message } => message.as_str(),
            Self::NotFound { message } => *message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message } = &self {
            tracing::error!("Internal error: {}", message);
        }

        let status = self.status();
        let body = json!({ "error": self.message() });
        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}
