//! Password hashing and verification (argon2id, salted per call).

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Minimum accepted password length, checked before hashing.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The stored digest could not be parsed. This is a data corruption
    /// signal, not a failed login.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
}

/// Validate a candidate password against the minimum policy.
pub fn validate(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

/// Hash a password with a fresh random salt.
///
/// The same input produces a different digest on every call; comparison goes
/// through [`verify`], never through re-derivation and equality.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    validate(password)?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored digest.
///
/// A mismatch is `Ok(false)`; only a malformed stored digest is an error.
pub fn verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let digest = hash("correct horse battery").unwrap();
        assert!(verify("correct horse battery", &digest).unwrap());
        assert!(!verify("wrong password!", &digest).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("correct horse battery").unwrap();
        let b = hash("correct horse battery").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn short_password_rejected_before_hashing() {
        assert_eq!(hash("short"), Err(PasswordError::TooShort));
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let err = verify("whatever!", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash(_)));
    }
}
