//! The single authorization decision point.
//!
//! Every mutating operation funnels through [`authorize`] instead of
//! re-implementing role/ownership branching per handler.

use thiserror::Error;

use stockroom_core::UserId;

use crate::Role;

/// Authenticated identity attached to a request by the identity resolver.
///
/// Read-only for the remainder of the request; no session state survives the
/// request (stateless token model).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// An operation on a protected resource, as the policy sees it.
///
/// Ownership- and target-dependent variants carry just enough of the resource
/// to decide; the policy itself does no IO.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    ListItems,
    CreateItem,
    UpdateItem { owner: UserId },
    DeleteItem { owner: UserId },
    ListUsers,
    CreateUser,
    UpdateUser { target: UserId, changes_role: bool },
    DeleteUser,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("forbidden: {0}")]
pub struct Forbidden(pub &'static str);

/// Decide whether `identity` may perform `action`.
///
/// - No IO
/// - No panics
/// - Role check short-circuits before any ownership check; an admin never
///   needs to match ownership.
pub fn authorize(identity: &Identity, action: Action) -> Result<(), Forbidden> {
    if identity.role.is_admin() {
        return Ok(());
    }

    match action {
        Action::ListItems | Action::CreateItem => Ok(()),

        Action::UpdateItem { owner } | Action::DeleteItem { owner } => {
            if owner == identity.user_id {
                Ok(())
            } else {
                Err(Forbidden("only the item's owner or an admin may modify it"))
            }
        }

        Action::ListUsers => Err(Forbidden("listing users requires the admin role")),
        Action::CreateUser => Err(Forbidden("creating users requires the admin role")),
        Action::DeleteUser => Err(Forbidden("deleting users requires the admin role")),

        Action::UpdateUser {
            target,
            changes_role,
        } => {
            if target != identity.user_id {
                return Err(Forbidden("only an admin may update another user"));
            }
            if changes_role {
                return Err(Forbidden("only an admin may change a user's role"));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId) -> Identity {
        Identity {
            user_id: id,
            role: Role::User,
        }
    }

    fn admin() -> Identity {
        Identity {
            user_id: UserId::new(),
            role: Role::Admin,
        }
    }

    #[test]
    fn any_identity_may_read_and_create_items() {
        let me = user(UserId::new());
        assert!(authorize(&me, Action::ListItems).is_ok());
        assert!(authorize(&me, Action::CreateItem).is_ok());
    }

    #[test]
    fn owner_may_mutate_own_item_others_may_not() {
        let mine = UserId::new();
        let me = user(mine);
        let someone_else = user(UserId::new());

        assert!(authorize(&me, Action::UpdateItem { owner: mine }).is_ok());
        assert!(authorize(&me, Action::DeleteItem { owner: mine }).is_ok());
        assert!(authorize(&someone_else, Action::UpdateItem { owner: mine }).is_err());
        assert!(authorize(&someone_else, Action::DeleteItem { owner: mine }).is_err());
    }

    #[test]
    fn admin_bypasses_ownership() {
        let owner = UserId::new();
        assert!(authorize(&admin(), Action::DeleteItem { owner }).is_ok());
        assert!(authorize(&admin(), Action::UpdateItem { owner }).is_ok());
    }

    #[test]
    fn user_management_is_admin_only() {
        let me = user(UserId::new());
        assert!(authorize(&me, Action::ListUsers).is_err());
        assert!(authorize(&me, Action::CreateUser).is_err());
        assert!(authorize(&me, Action::DeleteUser).is_err());

        assert!(authorize(&admin(), Action::ListUsers).is_ok());
        assert!(authorize(&admin(), Action::CreateUser).is_ok());
        assert!(authorize(&admin(), Action::DeleteUser).is_ok());
    }

    #[test]
    fn self_update_allowed_but_role_change_is_not() {
        let mine = UserId::new();
        let me = user(mine);

        assert!(
            authorize(
                &me,
                Action::UpdateUser {
                    target: mine,
                    changes_role: false
                }
            )
            .is_ok()
        );
        assert!(
            authorize(
                &me,
                Action::UpdateUser {
                    target: mine,
                    changes_role: true
                }
            )
            .is_err()
        );
        assert!(
            authorize(
                &me,
                Action::UpdateUser {
                    target: UserId::new(),
                    changes_role: false
                }
            )
            .is_err()
        );
    }

    #[test]
    fn admin_may_update_anyone_including_roles() {
        assert!(
            authorize(
                &admin(),
                Action::UpdateUser {
                    target: UserId::new(),
                    changes_role: true
                }
            )
            .is_ok()
        );
    }
}
