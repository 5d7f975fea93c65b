//! Bearer session-token check → `AuthenticatedIdentity` in request extensions.
//!
//! - No `Authorization: Bearer` header: the request continues without an identity;
//!   handlers that need one reject it through the extractor.
//! - Header present: the token must validate, otherwise 401. A valid token is
//!   resolved to an identity and handed to the extractor via extensions.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Apply the bearer middleware to every route of `router`.
///
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = state.auth.resolve_token(req.headers()).map(str::to_owned);
    let Some(token) = token else {
        return Ok(next.run(req).await);
    };

    if let Err(err) = state.auth.validate_token(&token) {
        tracing::warn!(status = ?err.status(), error = %err.cause(), "session token rejected");
        return Err(err.into());
    }

    let identity = match state.auth.get_authentication(&token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(error = %err, "session token could not be resolved");
            return Err(err.into());
        }
    };

    tracing::debug!(
        username = %identity.username,
        guest = identity.is_guest(),
        "session token accepted"
    );

    // middleware → extractor
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
