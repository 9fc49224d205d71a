//! HTTP error responses.
//!
//! Maps each `UserError` to a status code and a fixed `{code, message}` body.
//! The underlying cause is logged here and never sent to the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};
use userstore_core::UserError;

/// Error response with code and message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details including code and message
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code from the taxonomy (E1001-E2002)
    pub code: String,
    /// Human-readable error description
    pub message: String,
}

/// Handler error carrying a domain error to the response boundary.
#[derive(Debug)]
pub struct ApiError(pub UserError);

impl ApiError {
    /// HTTP status for the wrapped error.
    ///
    /// Every failure on the write path is a 400. On the read path a
    /// malformed id is a 400 and anything else is a 404.
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            UserError::MalformedBody { .. }
            | UserError::InvalidId { .. }
            | UserError::InvalidBlogUrl { .. }
            | UserError::DuplicateUser { .. }
            | UserError::CreateFailed(_) => StatusCode::BAD_REQUEST,
            UserError::UserNotFound { .. } | UserError::FetchFailed(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(UserError::MalformedBody { reason: rejection.body_text() })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_client_error() {
            warn!(code = self.0.code(), error = ?self.0, "Request rejected");
        } else {
            let cause = std::error::Error::source(&self.0).map(ToString::to_string);
            error!(
                code = self.0.code(),
                cause = cause.as_deref().unwrap_or("unknown"),
                "Storage operation failed"
            );
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.0.code().to_string(),
                message: self.0.message().to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
