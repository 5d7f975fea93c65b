use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;

use crate::api::v1::dto::{
    identity::IdentityResponse,
    token::{TokenResponse, ValidateRequest, ValidateResponse},
};
use crate::api::v1::extractors::CurrentIdentity;
use crate::error::AppError;
use crate::services::auth::TokenError;
use crate::state::AppState;

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<IdentityResponse> {
    Json(identity.into())
}

/// Either `{"valid": true}` or 401; an invalid token is never reported as `false`.
pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let token = req
        .token
        .ok_or_else(|| AppError::InvalidRequest("token is required".to_string()))?;

    let valid = state.auth.validate_token(&token).map_err(|err| {
        tracing::debug!(status = ?err.status(), "token validation failed");
        AppError::from(err)
    })?;

    Ok(Json(ValidateResponse { valid }))
}

/// Re-issue the caller's token with a fresh last-message timestamp.
/// Expiry is unchanged. Guests may not do this.
pub async fn touch(
    State(state): State<AppState>,
    headers: HeaderMap,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<TokenResponse>, AppError> {
    if identity.is_guest() {
        return Err(AppError::Forbidden);
    }

    let token = state
        .auth
        .resolve_token(&headers)
        .ok_or(AppError::Unauthorized)?;

    let access_token = state.auth.reissue(token).map_err(|err| {
        if !matches!(err, TokenError::Invalid(_)) {
            tracing::error!(error = %err, user = %identity.username, "failed to reissue session token");
        }
        AppError::from(err)
    })?;
    let claims = state
        .auth
        .get_claims(Some(&access_token))?
        .ok_or(AppError::Internal)?;

    let expires_in = u64::try_from(claims.exp - Utc::now().timestamp()).unwrap_or(0);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in,
    }))
}
