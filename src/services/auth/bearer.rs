//! `Authorization: Bearer <token>` extraction.
//!
//! Purely syntactic: the prefix is matched case-sensitively and nothing about
//! the remainder is checked here.

use axum::http::{HeaderMap, header};

pub const BEARER_PREFIX: &str = "Bearer ";

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
}
