//! Request DTOs and JSON mapping helpers.
//!
//! Request fields are all optional at the wire level so that a missing field
//! becomes a domain validation error (400) instead of a deserialization
//! rejection.

use serde::Deserialize;
use serde_json::json;

use stockroom_auth::{Role, UserUpdate, UserView};
use stockroom_core::{DomainError, DomainResult};
use stockroom_inventory::{Item, ItemDraft, Location};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

impl ItemPayload {
    /// Convert to a domain draft, parsing the location name if present.
    pub fn into_draft(self) -> DomainResult<ItemDraft> {
        let location = match self.location {
            Some(s) => Some(s.parse::<Location>()?),
            None => None,
        };

        Ok(ItemDraft {
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            location,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Admin user creation; also reused for updates, where every field is
/// genuinely optional.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UserPayload {
    pub fn parse_role(&self) -> DomainResult<Option<Role>> {
        match &self.role {
            Some(s) => Ok(Some(s.parse::<Role>()?)),
            None => Ok(None),
        }
    }

    pub fn into_update(self) -> DomainResult<UserUpdate> {
        let role = self.parse_role()?;
        Ok(UserUpdate {
            name: self.name,
            email: self.email,
            password: self.password,
            role,
        })
    }
}

// -------------------------
// Response mapping
// -------------------------

/// Item projection, joined with the owner's display name when the owning
/// account still exists.
pub fn item_to_json(item: &Item, owner_name: Option<&str>) -> serde_json::Value {
    json!({
        "id": item.id,
        "name": item.name,
        "description": item.description,
        "quantity": item.quantity,
        "location": item.location,
        "created_by": item.created_by,
        "created_by_name": owner_name,
        "created_at": item.created_at,
    })
}

pub fn user_to_json(view: &UserView) -> serde_json::Value {
    json!({
        "id": view.id,
        "name": view.name,
        "email": view.email,
        "role": view.role,
    })
}

/// Required-field check shared by login and register, before the domain layer
/// sees the values.
pub fn require(field: &'static str, value: Option<String>) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("{field} is required"))),
    }
}
