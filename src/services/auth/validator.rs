//! Token validation.
//!
//! `validate` answers `Ok(true)` or fails; it never answers `Ok(false)`. Callers
//! that want a plain classification without an error path should use
//! [`TokenCodec::inspect`].

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::jwt::TokenCodec;

/// Outcome of checking a token's signature and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    Valid,
    Expired,
    Tampered,
    Malformed,
}

impl TokenStatus {
    /// Classify a verification failure of `token`.
    ///
    /// A signature segment that is not valid base64url, behind a header and
    /// payload that are, is an altered signature rather than a malformed token.
    fn classify(err: &JwtError, token: &str) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Self::Tampered,
            ErrorKind::Base64(_) if has_well_formed_body(token) => Self::Tampered,
            _ => Self::Malformed,
        }
    }
}

/// Three segments whose header and payload decode as base64url.
fn has_well_formed_body(token: &str) -> bool {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(_), None) => {
            URL_SAFE_NO_PAD.decode(header).is_ok() && URL_SAFE_NO_PAD.decode(payload).is_ok()
        }
        _ => false,
    }
}

#[derive(Debug, Error)]
#[error("Expired or invalid JWT token")]
pub struct TokenValidationError {
    status: TokenStatus,
    #[source]
    source: JwtError,
}

impl TokenValidationError {
    pub fn status(&self) -> TokenStatus {
        self.status
    }

    pub fn cause(&self) -> &JwtError {
        &self.source
    }
}

impl TokenCodec {
    /// Check signature and expiry without interpreting the rest of the payload.
    ///
    /// Every failure, including input that is not a token at all, is an `Err`.
    pub fn validate(&self, token: &str) -> Result<bool, TokenValidationError> {
        self.verify(token)
            .map(|()| true)
            .map_err(|source| TokenValidationError {
                status: TokenStatus::classify(&source, token),
                source,
            })
    }

    pub fn inspect(&self, token: &str) -> TokenStatus {
        match self.verify(token) {
            Ok(()) => TokenStatus::Valid,
            Err(e) => TokenStatus::classify(&e, token),
        }
    }
}
