use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = dto::require("email", body.email)?;
    let password = dto::require("password", body.password)?;

    let outcome = services.login(&email, &password)?;

    Ok(Json(serde_json::json!({
        "token": outcome.token,
        "role": outcome.role,
        "user": dto::user_to_json(&outcome.user),
    })))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = dto::require("name", body.name)?;
    let email = dto::require("email", body.email)?;
    let password = dto::require("password", body.password)?;

    let view = services.register(name, email, password)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "user registered",
            "user": dto::user_to_json(&view),
        })),
    ))
}
