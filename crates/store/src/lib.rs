//! Persistence collaborator: storage traits and the in-memory implementation.
//!
//! Each mutating operation is a single logical unit against one entity;
//! concurrent updates to the same record are last-write-wins, with no version
//! check.

pub mod memory;

use thiserror::Error;

use stockroom_auth::User;
use stockroom_core::{DomainError, ItemId, UserId};
use stockroom_inventory::Item;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Email uniqueness is the store's invariant: inserts/updates that would
    /// duplicate an email are refused here, not in the entity.
    #[error("a user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("storage failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => {
                DomainError::conflict(format!("a user with email '{email}' already exists"))
            }
            StoreError::Backend(msg) => DomainError::internal(msg),
        }
    }
}

/// Item persistence.
pub trait ItemStore: Send + Sync {
    fn insert(&self, item: Item) -> Result<(), StoreError>;
    fn get(&self, id: ItemId) -> Result<Option<Item>, StoreError>;
    fn list(&self) -> Result<Vec<Item>, StoreError>;
    fn update(&self, item: Item) -> Result<(), StoreError>;
    /// Remove and return the record, or `None` if absent.
    fn remove(&self, id: ItemId) -> Result<Option<Item>, StoreError>;
}

/// User persistence.
pub trait UserStore: Send + Sync {
    fn insert(&self, user: User) -> Result<(), StoreError>;
    fn get(&self, id: UserId) -> Result<Option<User>, StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    fn list(&self) -> Result<Vec<User>, StoreError>;
    fn update(&self, user: User) -> Result<(), StoreError>;
    fn remove(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

pub use memory::MemoryStore;
