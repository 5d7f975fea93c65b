/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{AuthService, TokenCodec};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AppError> {
    let codec = TokenCodec::new(&config.token).map_err(|e| {
        error!(error = %e, "failed to build session token codec");
        AppError::Internal
    })?;

    Ok(Arc::new(AuthService::new(codec)))
}
