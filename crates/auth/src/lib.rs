//! `stockroom-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: token
//! verification, password hashing, and the access-control policy are pure
//! functions over values the transport layer hands in.

pub mod claims;
pub mod password;
pub mod policy;
pub mod roles;
pub mod user;

pub use claims::{Claims, TokenError, TokenService};
pub use policy::{Action, Forbidden, Identity, authorize};
pub use roles::Role;
pub use user::{NewUser, User, UserUpdate, UserView};
