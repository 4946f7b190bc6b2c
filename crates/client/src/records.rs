//! Wire types mirroring the API's JSON bodies.

use serde::{Deserialize, Serialize};

use stockroom_core::{ItemId, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub location: String,
    pub created_by: UserId,
    pub created_by_name: Option<String>,
    pub created_at: String,
}

/// Fields sent when creating or updating an item. The server validates; the
/// client stays permissive.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub user: UserRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletedItem {
    pub message: String,
    pub item: ItemRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletedUser {
    pub message: String,
    pub user: UserRecord,
}
