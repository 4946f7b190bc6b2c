//! In-memory store for dev/test deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use stockroom_auth::User;
use stockroom_core::{ItemId, UserId};
use stockroom_inventory::Item;

use crate::{ItemStore, StoreError, UserStore};

/// In-memory implementation of both stores.
///
/// Interior mutability via `RwLock`; a poisoned lock surfaces as a backend
/// failure rather than a panic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<ItemId, Item>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

impl ItemStore for MemoryStore {
    fn insert(&self, item: Item) -> Result<(), StoreError> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        map.insert(item.id, item);
        Ok(())
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let map = self.items.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Item>, StoreError> {
        let map = self.items.read().map_err(|_| poisoned())?;
        let mut items: Vec<Item> = map.values().cloned().collect();
        // UUIDv7 ids are time-ordered; sort for a stable listing.
        items.sort_by_key(|i| *i.id.as_uuid());
        Ok(items)
    }

    fn update(&self, item: Item) -> Result<(), StoreError> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        map.insert(item.id, item);
        Ok(())
    }

    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let mut map = self.items.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id))
    }
}

impl UserStore for MemoryStore {
    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut map = self.users.write().map_err(|_| poisoned())?;
        if map.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        map.insert(user.id, user);
        Ok(())
    }

    fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|u| u.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        let map = self.users.read().map_err(|_| poisoned())?;
        let mut users: Vec<User> = map.values().cloned().collect();
        users.sort_by_key(|u| *u.id.as_uuid());
        Ok(users)
    }

    fn update(&self, user: User) -> Result<(), StoreError> {
        let mut map = self.users.write().map_err(|_| poisoned())?;
        if map
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        map.insert(user.id, user);
        Ok(())
    }

    fn remove(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let mut map = self.users.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_auth::{NewUser, Role};
    use stockroom_inventory::ItemDraft;

    fn user(email: &str) -> User {
        User::create(NewUser {
            name: "Someone".to_string(),
            email: email.to_string(),
            password: "long enough password".to_string(),
            role: Role::User,
        })
        .unwrap()
    }

    fn item(name: &str, owner: UserId) -> Item {
        Item::create(
            ItemDraft {
                name: Some(name.to_string()),
                quantity: Some(1),
                ..Default::default()
            },
            owner,
        )
        .unwrap()
    }

    #[test]
    fn duplicate_email_insert_is_refused() {
        let store = MemoryStore::new();
        UserStore::insert(&store, user("a@example.com")).unwrap();

        let err = UserStore::insert(&store, user("a@example.com")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateEmail("a@example.com".to_string()));
        assert_eq!(UserStore::list(&store).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_email_update_is_refused_but_self_update_is_not() {
        let store = MemoryStore::new();
        let a = user("a@example.com");
        let mut b = user("b@example.com");
        UserStore::insert(&store, a).unwrap();
        UserStore::insert(&store, b.clone()).unwrap();

        b.email = "a@example.com".to_string();
        assert!(matches!(
            UserStore::update(&store, b.clone()),
            Err(StoreError::DuplicateEmail(_))
        ));

        b.email = "b2@example.com".to_string();
        UserStore::update(&store, b).unwrap();
    }

    #[test]
    fn remove_is_not_idempotent() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let it = item("Bolt", owner);
        let id = it.id;
        ItemStore::insert(&store, it).unwrap();

        assert!(ItemStore::remove(&store, id).unwrap().is_some());
        assert!(ItemStore::remove(&store, id).unwrap().is_none());
    }

    #[test]
    fn find_by_email_matches_normalized_email() {
        let store = MemoryStore::new();
        UserStore::insert(&store, user("Mixed@Case.com")).unwrap();

        // User::create lowercases; lookups use the normalized form.
        assert!(
            UserStore::find_by_email(&store, "mixed@case.com")
                .unwrap()
                .is_some()
        );
    }
}
