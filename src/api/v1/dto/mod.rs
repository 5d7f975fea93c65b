pub mod identity;
pub mod token;
