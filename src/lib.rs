//! Session-token authentication for the messenger backend.
//!
//! Issues HS256-signed session tokens, verifies them on every request and
//! resolves the caller's identity and roles.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
