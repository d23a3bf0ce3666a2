// SPDX-License-Identifier: AGPL-3.0-or-later

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// Stored as uppercase text in the `users.role` column and serialized the
/// same way on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    /// Normal customer account.
    User,
    /// Full administrative access (catalog mutations).
    Admin,
}

impl Role {
    /// Check membership in an accepted role set. The role gate allows the
    /// operation exactly when this returns true.
    pub fn permits(&self, allowed: &[Role]) -> bool {
        allowed.contains(self)
    }
}

impl Default for Role {
    /// New registrations get the least-privileged role.
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permits_checks_set_membership() {
        assert!(Role::Admin.permits(&[Role::Admin]));
        assert!(!Role::User.permits(&[Role::Admin]));
        assert!(Role::User.permits(&[Role::User, Role::Admin]));
        assert!(!Role::Admin.permits(&[]));
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""USER""#);
        let parsed: Role = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
