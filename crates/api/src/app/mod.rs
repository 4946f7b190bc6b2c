//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the operations behind every route
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use stockroom_auth::TokenService;
use stockroom_store::MemoryStore;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: &AppConfig) -> Router {
    let tokens = Arc::new(TokenService::new(
        &config.jwt_secret,
        config.token_ttl.as_secs() as i64,
    ));

    let store = Arc::new(MemoryStore::new());
    let services = Arc::new(services::AppServices::new(
        store.clone(),
        store,
        tokens.clone(),
    ));

    let auth_state = middleware::AuthState { tokens };

    // Protected routes: require a verified identity.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    routes::public_router()
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
