//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error taxonomy.
///
/// Every failure a request can produce maps to exactly one of these; the API
/// layer owns the translation to HTTP status codes and never invents new
/// categories per handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource does not resolve.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique field collided (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid identity token.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but the policy denies the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Persistence or other unexpected failure. The message is for logs; the
    /// API layer echoes a generic body instead.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
