#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http_body_util::BodyExt;
use messenger_auth::app::{build_router, build_state};
use messenger_auth::config::{AppEnv, Config, DEFAULT_TOKEN_VALIDITY_MS, TokenConfig};
use messenger_auth::state::AppState;

pub const SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        request_timeout_seconds: 30,
        request_body_limit_bytes: 1024 * 1024,
        token: TokenConfig {
            secret_key: SECRET.to_string(),
            validity_ms: DEFAULT_TOKEN_VALIDITY_MS,
        },
    }
}

pub fn test_app() -> (Router, AppState) {
    let config = test_config();
    let state = build_state(&config).unwrap();
    (build_router(state.clone(), &config), state)
}

pub async fn read_body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
