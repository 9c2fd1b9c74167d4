//! Credentials and access tokens.

pub mod password;
pub mod token;

pub use token::{Claims, TokenError, TokenService};
