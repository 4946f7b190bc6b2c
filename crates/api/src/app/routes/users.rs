use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_auth::{Identity, NewUser};
use stockroom_core::UserId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", axum::routing::put(update_user).delete(delete_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let users = services.list_users(&identity)?;

    let body: Vec<serde_json::Value> = users.iter().map(dto::user_to_json).collect();
    Ok(Json(body))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<dto::UserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let role = body.parse_role()?.unwrap_or_default();
    let draft = NewUser {
        name: dto::require("name", body.name)?,
        email: dto::require("email", body.email)?,
        password: dto::require("password", body.password)?,
        role,
    };

    let view = services.create_user(&identity, draft)?;
    Ok((StatusCode::CREATED, Json(dto::user_to_json(&view))))
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<dto::UserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = id.parse()?;
    let update = body.into_update()?;

    let view = services.update_user(&identity, id, update)?;
    Ok(Json(dto::user_to_json(&view)))
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = id.parse()?;

    let view = services.delete_user(&identity, id)?;
    Ok(Json(serde_json::json!({
        "message": "user deleted",
        "user": dto::user_to_json(&view),
    })))
}
