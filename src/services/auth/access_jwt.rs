use axum::http::HeaderMap;
use chrono::{DateTime, TimeDelta, Utc};

use crate::services::auth::bearer::extract_bearer_token;
use crate::services::auth::claims::TokenClaims;
use crate::services::auth::identity::AuthenticatedIdentity;
use crate::services::auth::jwt::{TokenCodec, TokenError};
use crate::services::auth::roles::Role;
use crate::services::auth::validator::{TokenStatus, TokenValidationError};

/// Session-token service: issuing, verifying and resolving identities.
///
/// Holds no per-token state; every call verifies the token it is given.
#[derive(Clone, Debug)]
pub struct AuthService {
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    pub fn validity(&self) -> TimeDelta {
        self.codec.validity()
    }

    pub fn issue_token(
        &self,
        username: &str,
        roles: &[Role],
        issued_at: Option<DateTime<Utc>>,
    ) -> Result<String, TokenError> {
        self.codec.encode(username, roles, issued_at)
    }

    pub fn get_claims(&self, token: Option<&str>) -> Result<Option<TokenClaims>, TokenError> {
        self.codec.get_claims(token)
    }

    pub fn get_username(&self, token: &str) -> Result<String, TokenError> {
        self.codec.decode(token).map(|claims| claims.sub)
    }

    /// Roles named in the `auth` claim, in token order. Unknown names and
    /// entries that are not plain strings map to `Guest`.
    pub fn get_authorities(&self, token: &str) -> Result<Vec<Role>, TokenError> {
        self.codec.decode(token).map(|claims| authorities_of(&claims))
    }

    /// Resolve the identity behind `token`.
    ///
    /// If any authority is `Guest` the identity is guest-style, even when other
    /// roles are present. Username and authorities come from a single verified
    /// parse.
    pub fn get_authentication(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        let claims = self.codec.decode(token)?;
        let authorities = authorities_of(&claims);

        if authorities.contains(&Role::Guest) {
            return Ok(AuthenticatedIdentity::guest(claims.sub));
        }
        Ok(AuthenticatedIdentity::verified(claims.sub, authorities))
    }

    /// Validate-or-fail; see [`TokenCodec::validate`].
    pub fn validate_token(&self, token: &str) -> Result<bool, TokenValidationError> {
        self.codec.validate(token)
    }

    pub fn inspect(&self, token: &str) -> TokenStatus {
        self.codec.inspect(token)
    }

    /// Issue a replacement token with a fresh last-message timestamp.
    ///
    /// The original issued-at is kept, so the replacement expires exactly when
    /// the old token would have. A token without `iat` is treated as issued one
    /// validity period before its expiration.
    pub fn reissue(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.codec.decode(token)?;
        let roles = authorities_of(&claims);
        let issued_at = match claims.issued_at() {
            Some(iat) => iat,
            None => claims
                .expiration()
                .and_then(|exp| exp.checked_sub_signed(self.codec.validity()))
                .ok_or(TokenError::ExpirationOverflow)?,
        };
        self.codec.encode(&claims.sub, &roles, Some(issued_at))
    }

    pub fn resolve_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        extract_bearer_token(headers)
    }
}

fn authorities_of(claims: &TokenClaims) -> Vec<Role> {
    claims
        .role_names()
        .map(|name| name.map_or(Role::Guest, Role::from_wire_name))
        .collect()
}
