pub mod access_jwt;
pub mod bearer;
pub mod claims;
pub mod factory;
pub mod identity;
pub mod jwt;
pub mod roles;
pub mod validator;

pub use access_jwt::AuthService;
pub use bearer::extract_bearer_token;
pub use claims::TokenClaims;
pub use factory::build_auth_service;
pub use identity::AuthenticatedIdentity;
pub use jwt::{TokenCodec, TokenError};
pub use roles::Role;
pub use validator::{TokenStatus, TokenValidationError};
