//! Request middleware: authentication, role gate and access log.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{AppState, AuthUser};
use crate::constants::{ERROR_ADMIN_ONLY, ERROR_TOKEN_INVALID, ERROR_TOKEN_REQUIRED};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Require a valid access token.
///
/// Accepts `Authorization: Bearer <token>` as well as the bare token.
/// On success injects `AuthUser` into request extensions.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_auth_inner(&state, req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(state: &AppState, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(ApiError::Unauthorized(ERROR_TOKEN_REQUIRED.to_string()));
    }

    let claims = state.tokens.validate(token).map_err(|err| {
        log::debug!("Rejected token: {err}");
        ApiError::Unauthorized(ERROR_TOKEN_INVALID.to_string())
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        rol: claims.rol,
    });

    Ok(next.run(req).await)
}

/// Reject callers that are not administrators. Runs inside `require_auth`.
pub async fn admin_only(req: Request, next: Next) -> Response {
    match req.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin() => next.run(req).await,
        Some(_) => ApiError::forbidden(ERROR_ADMIN_ONLY).into_response(),
        None => ApiError::Unauthorized(ERROR_TOKEN_REQUIRED.to_string()).into_response(),
    }
}

/// Tag each request with an id and log its outcome.
pub async fn request_log(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status();
    let elapsed = started.elapsed();
    if status.is_server_error() {
        log::error!("[{request_id}] {method} {path} -> {} ({elapsed:?})", status.as_u16());
    } else {
        log::info!("[{request_id}] {method} {path} -> {} ({elapsed:?})", status.as_u16());
    }

    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}
