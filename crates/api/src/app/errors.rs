//! Consistent error responses.
//!
//! Every handler returns `Result<_, ApiError>`; the status mapping lives here
//! and nowhere else.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stockroom_auth::{Forbidden, TokenError};
use stockroom_core::DomainError;
use stockroom_store::StoreError;

/// HTTP-facing wrapper around [`DomainError`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<Forbidden> for ApiError {
    fn from(err: Forbidden) -> Self {
        Self(DomainError::Forbidden(err.0.to_string()))
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self(DomainError::unauthenticated("invalid or expired token")),
            TokenError::Signing(msg) => Self(DomainError::internal(msg)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            DomainError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            DomainError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DomainError::Internal(msg) => {
                // Detail goes to the logs; the body stays generic.
                tracing::error!(error = %msg, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        json_error(status, message)
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
