//! HTTP API: routing, middleware, handlers and error mapping.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;
pub mod validation;
pub mod views;

pub use error::ApiError;
pub use router::build_router;
pub use types::{AppState, AuthUser};
