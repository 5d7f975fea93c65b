use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config::TokenConfig;
use crate::services::auth::claims::TokenClaims;
use crate::services::auth::roles::Role;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token secret key is not configured")]
    MissingSecret,

    #[error("token validity of {0}ms is out of range")]
    InvalidValidity(u64),

    #[error("invalid token key material: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("token expiration overflows the supported time range")]
    ExpirationOverflow,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, malformed structure or expired.
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Only the registered time claim; enough to check signature and expiry.
#[derive(Debug, Clone, Deserialize)]
struct ExpiryOnly {
    #[allow(dead_code)]
    exp: i64,
}

/// HS256 session-token codec.
///
/// The secret is re-encoded to its base64 text form before the keys are built,
/// matching tokens issued by earlier deployments. Key material is not printable
/// via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity: TimeDelta,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("validity", &self.validity)
            .finish()
    }
}

fn encode_secret(secret: &str) -> String {
    STANDARD.encode(secret.as_bytes())
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Result<Self, TokenError> {
        if config.secret_key.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let validity = i64::try_from(config.validity_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .ok_or(TokenError::InvalidValidity(config.validity_ms))?;

        let encoded_secret = encode_secret(&config.secret_key);
        let encoding_key =
            EncodingKey::from_base64_secret(&encoded_secret).map_err(TokenError::InvalidKey)?;
        let decoding_key =
            DecodingKey::from_base64_secret(&encoded_secret).map_err(TokenError::InvalidKey)?;

        // No leeway: a token is dead the second its `exp` passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            validity,
        })
    }

    pub fn validity(&self) -> TimeDelta {
        self.validity
    }

    /// Issue a signed token for `username` carrying `roles`.
    ///
    /// `issued_at` defaults to now; the expiration is always `issued_at + validity`.
    /// The last-message timestamp is the time of this call, not `issued_at`.
    pub fn encode(
        &self,
        username: &str,
        roles: &[Role],
        issued_at: Option<DateTime<Utc>>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let issued_at = issued_at.unwrap_or(now);
        let expiration = issued_at
            .checked_add_signed(self.validity)
            .ok_or(TokenError::ExpirationOverflow)?;

        let claims = TokenClaims {
            sub: username.to_string(),
            auth: roles.iter().map(|role| role.as_str().into()).collect(),
            last_message_timestamp: now.timestamp_millis(),
            iat: Some(issued_at.timestamp()),
            exp: expiration.timestamp(),
        };

        self.sign(&claims)
    }

    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::HS256);
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify signature and expiry, then parse the claim set.
    ///
    /// Only `sub` and `exp` are required; see [`TokenClaims`].
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }

    /// Like [`decode`](Self::decode), but an absent token is not an error.
    pub fn get_claims(&self, token: Option<&str>) -> Result<Option<TokenClaims>, TokenError> {
        match token {
            None => Ok(None),
            Some(token) => self.decode(token).map(Some),
        }
    }

    /// Signature and expiry only; the rest of the payload is not interpreted.
    pub(crate) fn verify(&self, token: &str) -> Result<(), jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<ExpiryOnly>(token, &self.decoding_key, &self.validation).map(|_| ())
    }
}
