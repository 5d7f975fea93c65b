/*
 * Responsibility
 * - URL layout of v1
 * - The bearer middleware is applied to this whole router by app.rs
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::auth::{me, touch, validate};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/validate", post(validate))
        .route("/auth/touch", post(touch))
}
