use serde::Serialize;

use crate::services::auth::roles::Role;

/// Identity resolved from a verified session token, scoped to one request.
///
/// - `credentials == None`: guest-style identity. No authorities are granted.
/// - `credentials == Some("")`: authenticated; the signature already proved the
///   credentials, so nothing secret is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedIdentity {
    pub username: String,
    pub authorities: Vec<Role>,
    #[serde(skip)]
    pub credentials: Option<String>,
}

impl AuthenticatedIdentity {
    pub fn guest(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            authorities: Vec::new(),
            credentials: None,
        }
    }

    pub fn verified(username: impl Into<String>, authorities: Vec<Role>) -> Self {
        Self {
            username: username.into(),
            authorities,
            credentials: Some(String::new()),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.credentials.is_none()
    }

    pub fn has_authority(&self, role: Role) -> bool {
        self.authorities.contains(&role)
    }
}
