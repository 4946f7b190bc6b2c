//! Request identity resolution.
//!
//! Runs before every protected route: extracts the bearer token, verifies it,
//! and attaches the resulting [`Identity`] to the request extensions. Handlers
//! never see raw tokens.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use stockroom_auth::{Identity, TokenService};
use stockroom_core::DomainError;

use crate::app::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.tokens.verify(token)?;

    // Role comes from the token, not a per-request user lookup; role changes
    // take effect on re-login.
    req.extensions_mut().insert(Identity {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let missing = || ApiError(DomainError::unauthenticated("missing bearer token"));

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(missing)?;

    let header = header.to_str().map_err(|_| missing())?;

    let token = header.strip_prefix("Bearer ").ok_or_else(missing)?.trim();
    if token.is_empty() {
        return Err(missing());
    }

    Ok(token)
}
