//! User account lifecycle: creation, permitted-field updates, projections.
//!
//! The entity is policy-agnostic: who may call which operation is decided by
//! [`crate::policy`] before anything here runs. This module only enforces
//! field validation and keeps the password digest from leaking outward.

use serde::Serialize;

use stockroom_core::{DomainError, DomainResult, UserId};

use crate::password::{self, PasswordError};
use crate::roles::Role;

/// A stored user record.
///
/// `password_hash` is deliberately not `Serialize`; read paths go through
/// [`UserView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Input for creating a user (registration or admin creation).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Input for updating a user. All required fields must be re-supplied; a
/// partial update that drops one is rejected, not silently defaulted.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    /// Whether applying this update would change `current`'s role.
    pub fn changes_role(&self, current: &User) -> bool {
        self.role.is_some_and(|r| r != current.role)
    }
}

/// Display-safe projection of a user (never includes the password digest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl User {
    /// Validate a draft and create the record, hashing the password.
    ///
    /// Email uniqueness is the store's invariant, not checked here.
    pub fn create(draft: NewUser) -> DomainResult<Self> {
        let name = validate_name(&draft.name)?;
        let email = validate_email(&draft.email)?;
        let password_hash = password::hash(&draft.password).map_err(DomainError::from)?;

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            role: draft.role,
        })
    }

    /// Re-validate and apply an update under the same rules as creation.
    ///
    /// Which fields the caller was *allowed* to set (role, other users'
    /// records) has already been decided by the policy; this only checks the
    /// values themselves. The password is re-hashed when supplied and left
    /// untouched otherwise.
    pub fn apply_update(&mut self, update: UserUpdate) -> DomainResult<()> {
        let name = match update.name {
            Some(n) => validate_name(&n)?,
            None => return Err(DomainError::validation("name is required")),
        };
        let email = match update.email {
            Some(e) => validate_email(&e)?,
            None => return Err(DomainError::validation("email is required")),
        };

        if let Some(pw) = update.password {
            self.password_hash = password::hash(&pw).map_err(DomainError::from)?;
        }
        if let Some(role) = update.role {
            self.role = role;
        }

        self.name = name;
        self.email = email;
        Ok(())
    }

    /// Verify a login attempt against the stored digest.
    pub fn verify_password(&self, candidate: &str) -> DomainResult<bool> {
        password::verify(candidate, &self.password_hash).map_err(DomainError::from)
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::validation("email cannot be empty"));
    }
    if !email.contains('@') {
        return Err(DomainError::validation("invalid email format"));
    }
    Ok(email)
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => DomainError::validation(err.to_string()),
            // Hashing and digest-parse failures are ours, not the caller's.
            PasswordError::Hashing(_) | PasswordError::MalformedHash(_) => {
                DomainError::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewUser {
        NewUser {
            name: "Alice Smith".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "correct horse battery".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn create_normalizes_email_and_hashes_password() {
        let user = User::create(draft()).unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "correct horse battery");
        assert!(user.verify_password("correct horse battery").unwrap());
        assert!(!user.verify_password("nope nope nope").unwrap());
    }

    #[test]
    fn create_rejects_empty_name_and_bad_email() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(matches!(
            User::create(d),
            Err(DomainError::Validation(_))
        ));

        let mut d = draft();
        d.email = "not-an-email".to_string();
        assert!(matches!(
            User::create(d),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn create_rejects_short_password() {
        let mut d = draft();
        d.password = "short".to_string();
        assert!(matches!(User::create(d), Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_requires_name_and_email_resupplied() {
        let mut user = User::create(draft()).unwrap();

        let result = user.apply_update(UserUpdate {
            name: None,
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_without_password_keeps_existing_hash() {
        let mut user = User::create(draft()).unwrap();
        let original_hash = user.password_hash.clone();

        user.apply_update(UserUpdate {
            name: Some("Alice S.".to_string()),
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(user.password_hash, original_hash);
        assert_eq!(user.name, "Alice S.");
    }

    #[test]
    fn update_with_password_rehashes() {
        let mut user = User::create(draft()).unwrap();
        let original_hash = user.password_hash.clone();

        user.apply_update(UserUpdate {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some("battery staple horse".to_string()),
            role: None,
        })
        .unwrap();

        assert_ne!(user.password_hash, original_hash);
        assert!(user.verify_password("battery staple horse").unwrap());
    }

    #[test]
    fn view_carries_no_password_material() {
        let user = User::create(draft()).unwrap();
        let view = UserView::from(&user);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn changes_role_detects_only_real_changes() {
        let user = User::create(draft()).unwrap();

        let same = UserUpdate {
            role: Some(Role::User),
            ..Default::default()
        };
        let escalation = UserUpdate {
            role: Some(Role::Admin),
            ..Default::default()
        };

        assert!(!same.changes_role(&user));
        assert!(escalation.changes_role(&user));
        assert!(!UserUpdate::default().changes_role(&user));
    }
}
