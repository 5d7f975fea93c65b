/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - Hand the identity resolved by the bearer middleware to handlers
 * - The identity type itself lives with the token services
 */

mod core;

pub use crate::services::auth::AuthenticatedIdentity;
pub use core::CurrentIdentity;
