//! Shared types for the HTTP layer.

use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::TokenService;
use crate::config::AuthConfig;
use crate::entities::Rol;
use crate::storage::Storage;

/// State shared by every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub tokens: TokenService,
    pub password_iterations: u32,
}

impl AppState {
    pub fn new(storage: Storage, auth: &AuthConfig) -> Self {
        Self {
            storage,
            tokens: TokenService::new(&auth.jwt_secret, auth.token_ttl_hours),
            password_iterations: auth.password_iterations,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.storage.conn
    }
}

/// Authenticated caller, injected into request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub rol: Rol,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.rol == Rol::Administrador
    }
}

/// Body for operations that only report an outcome.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
