//! Application services: the operations behind every route.
//!
//! Each method runs the same sequence: resolve the target, authorize, validate
//! and apply, persist. Handlers stay thin and the policy is consulted in
//! exactly one place per operation.

use std::sync::Arc;

use stockroom_auth::{
    Action, Identity, NewUser, Role, TokenService, User, UserUpdate, UserView, authorize,
};
use stockroom_core::{DomainError, DomainResult, ItemId, UserId};
use stockroom_inventory::{Item, ItemDraft};
use stockroom_store::{ItemStore, UserStore};

/// Successful login payload.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
    pub user: UserView,
}

pub struct AppServices {
    items: Arc<dyn ItemStore>,
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AppServices {
    pub fn new(
        items: Arc<dyn ItemStore>,
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            items,
            users,
            tokens,
        }
    }

    // -------------------------
    // Auth
    // -------------------------

    /// Verify credentials and mint a token.
    ///
    /// An unknown email is a 404, a wrong password a 401; the two are
    /// deliberately distinguishable.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(DomainError::NotFound("user"))?;

        if !user.verify_password(password)? {
            return Err(DomainError::unauthenticated("invalid credentials"));
        }

        let token = self
            .tokens
            .issue(user.id, user.role)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginOutcome {
            token,
            role: user.role,
            user: UserView::from(&user),
        })
    }

    /// Self-service registration. Always creates a regular user; roles are
    /// granted later by an admin.
    pub fn register(&self, name: String, email: String, password: String) -> DomainResult<UserView> {
        let user = User::create(NewUser {
            name,
            email,
            password,
            role: Role::User,
        })?;

        let view = UserView::from(&user);
        self.users.insert(user)?;

        tracing::info!(user_id = %view.id, "user registered");
        Ok(view)
    }

    // -------------------------
    // Items
    // -------------------------

    /// List all items, joined with each owner's display name. Items whose
    /// owning account was deleted keep their records but lose the name.
    pub fn list_items(&self, identity: &Identity) -> DomainResult<Vec<(Item, Option<String>)>> {
        authorize(identity, Action::ListItems).map_err(|e| DomainError::forbidden(e.0))?;

        let items = self.items.list()?;
        let mut joined = Vec::with_capacity(items.len());
        for item in items {
            let owner_name = self.users.get(item.created_by)?.map(|u| u.name);
            joined.push((item, owner_name));
        }
        Ok(joined)
    }

    pub fn create_item(&self, identity: &Identity, draft: ItemDraft) -> DomainResult<Item> {
        authorize(identity, Action::CreateItem).map_err(|e| DomainError::forbidden(e.0))?;

        let item = Item::create(draft, identity.user_id)?;
        self.items.insert(item.clone())?;

        tracing::info!(item_id = %item.id, user_id = %identity.user_id, "item created");
        Ok(item)
    }

    /// Existence is checked before authorization: probing a missing id yields
    /// 404 whoever asks.
    pub fn update_item(
        &self,
        identity: &Identity,
        id: ItemId,
        draft: ItemDraft,
    ) -> DomainResult<Item> {
        let mut item = self.items.get(id)?.ok_or(DomainError::NotFound("item"))?;

        authorize(
            identity,
            Action::UpdateItem {
                owner: item.created_by,
            },
        )
        .map_err(|e| DomainError::forbidden(e.0))?;

        item.apply_update(draft)?;
        self.items.update(item.clone())?;

        tracing::info!(item_id = %item.id, user_id = %identity.user_id, "item updated");
        Ok(item)
    }

    pub fn delete_item(&self, identity: &Identity, id: ItemId) -> DomainResult<Item> {
        let item = self.items.get(id)?.ok_or(DomainError::NotFound("item"))?;

        authorize(
            identity,
            Action::DeleteItem {
                owner: item.created_by,
            },
        )
        .map_err(|e| DomainError::forbidden(e.0))?;

        let removed = self
            .items
            .remove(id)?
            .ok_or(DomainError::NotFound("item"))?;

        tracing::info!(item_id = %removed.id, user_id = %identity.user_id, "item deleted");
        Ok(removed)
    }

    // -------------------------
    // Users
    // -------------------------

    pub fn list_users(&self, identity: &Identity) -> DomainResult<Vec<UserView>> {
        authorize(identity, Action::ListUsers).map_err(|e| DomainError::forbidden(e.0))?;

        let users = self.users.list()?;
        Ok(users.iter().map(UserView::from).collect())
    }

    pub fn create_user(&self, identity: &Identity, draft: NewUser) -> DomainResult<UserView> {
        authorize(identity, Action::CreateUser).map_err(|e| DomainError::forbidden(e.0))?;

        let user = User::create(draft)?;
        let view = UserView::from(&user);
        self.users.insert(user)?;

        tracing::info!(user_id = %view.id, created_by = %identity.user_id, "user created");
        Ok(view)
    }

    pub fn update_user(
        &self,
        identity: &Identity,
        id: UserId,
        update: UserUpdate,
    ) -> DomainResult<UserView> {
        let mut user = self.users.get(id)?.ok_or(DomainError::NotFound("user"))?;

        authorize(
            identity,
            Action::UpdateUser {
                target: id,
                changes_role: update.changes_role(&user),
            },
        )
        .map_err(|e| DomainError::forbidden(e.0))?;

        user.apply_update(update)?;
        self.users.update(user.clone())?;

        tracing::info!(user_id = %user.id, updated_by = %identity.user_id, "user updated");
        Ok(UserView::from(&user))
    }

    pub fn delete_user(&self, identity: &Identity, id: UserId) -> DomainResult<UserView> {
        let user = self.users.get(id)?.ok_or(DomainError::NotFound("user"))?;

        authorize(identity, Action::DeleteUser).map_err(|e| DomainError::forbidden(e.0))?;

        let removed = self
            .users
            .remove(user.id)?
            .ok_or(DomainError::NotFound("user"))?;

        tracing::info!(user_id = %removed.id, deleted_by = %identity.user_id, "user deleted");
        Ok(UserView::from(&removed))
    }
}
