use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Claim key holding the role names.
pub const AUTH_CLAIM: &str = "auth";
/// Claim key holding the last-message timestamp (epoch milliseconds).
pub const LAST_MESSAGE_CLAIM: &str = "last-message-timestamp";

/// Session token payload.
///
/// `iat`/`exp` are NumericDate values (epoch seconds) as the compact token
/// format requires. Tokens issued here always carry `exp = iat + validity`.
///
/// Only `sub` and `exp` are required. `auth` entries are kept as raw JSON:
/// older tokens carry objects such as `{"authority":"USERS"}` there, and a
/// missing `auth`, `iat` or last-message claim must not make an otherwise
/// valid token unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub auth: Vec<serde_json::Value>,
    #[serde(rename = "last-message-timestamp", default)]
    pub last_message_timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl TokenClaims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Role names in token order; entries that are not strings yield `None`.
    pub fn role_names(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.auth.iter().map(serde_json::Value::as_str)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| Utc.timestamp_opt(iat, 0).single())
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.last_message_timestamp).single()
    }
}
