use serde::Serialize;

use crate::services::auth::{AuthenticatedIdentity, Role};

#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub username: String,
    pub authorities: Vec<Role>,
    pub guest: bool,
}

impl From<AuthenticatedIdentity> for IdentityResponse {
    fn from(identity: AuthenticatedIdentity) -> Self {
        let guest = identity.is_guest();
        Self {
            username: identity.username,
            authorities: identity.authorities,
            guest,
        }
    }
}
