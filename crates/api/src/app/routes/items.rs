use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_auth::Identity;
use stockroom_core::ItemId;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", axum::routing::put(update_item).delete(delete_item))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, ApiError> {
    let items = services.list_items(&identity)?;

    let body: Vec<serde_json::Value> = items
        .iter()
        .map(|(item, owner_name)| dto::item_to_json(item, owner_name.as_deref()))
        .collect();

    Ok(Json(body))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<dto::ItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = body.into_draft()?;
    let item = services.create_item(&identity, draft)?;

    Ok((
        StatusCode::CREATED,
        Json(dto::item_to_json(&item, None)),
    ))
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<dto::ItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ItemId = id.parse()?;
    let draft = body.into_draft()?;

    let item = services.update_item(&identity, id, draft)?;
    Ok(Json(dto::item_to_json(&item, None)))
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ItemId = id.parse()?;

    let item = services.delete_item(&identity, id)?;
    Ok(Json(serde_json::json!({
        "message": "item deleted",
        "item": dto::item_to_json(&item, None),
    })))
}
