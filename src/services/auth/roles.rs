/*
 * Responsibility
 * - The closed set of authorization roles
 * - Mapping between a Role and its wire name inside the `auth` claim
 */
use std::fmt;

use serde::Serialize;

/// Authorization role carried in a session token.
///
/// The wire representation is the role name (`"ADMIN"`, `"USERS"`, `"GUEST"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Users,
    Guest,
}

impl Role {
    const ALL: [Role; 3] = [Role::Admin, Role::Users, Role::Guest];

    /// Every role, in stable declaration order.
    pub fn all() -> &'static [Role] {
        &Self::ALL
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Users => "USERS",
            Role::Guest => "GUEST",
        }
    }

    /// Resolve a wire name to a role.
    ///
    /// Matching is exact and case-sensitive. Anything unknown degrades to `Guest`
    /// rather than failing.
    pub fn from_wire_name(name: &str) -> Role {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == name)
            .unwrap_or(Role::Guest)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
