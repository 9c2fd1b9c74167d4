//! HTTP router.
//!
//! Layers from outermost to innermost:
//! CORS → request log → auth (protected routes) → admin gate (`/api/admin`)

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::api::endpoints::{auth, citas, health, horarios, medicos, notificaciones, observaciones, personas, usuarios};
use crate::api::middleware;
use crate::api::types::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Build the full application router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let admin = Router::new()
        .route("/usuarios", get(usuarios::list).post(usuarios::create))
        .route(
            "/usuarios/:id",
            get(usuarios::detail).put(usuarios::update).delete(usuarios::delete),
        )
        .route("/personas/:id", delete(personas::delete))
        .route("/medicos", post(medicos::create))
        .route("/medicos/:id", put(medicos::update).delete(medicos::delete))
        .route("/medicos/:id/horarios", post(horarios::create))
        .route("/horarios/:id", put(horarios::update).delete(horarios::delete))
        .route("/citas/todas", get(citas::list_all))
        .route("/citas/:id", put(citas::update).delete(citas::delete))
        .route("/observaciones", post(observaciones::create))
        .route(
            "/observaciones/:id",
            put(observaciones::update).delete(observaciones::delete),
        )
        .route("/notificaciones", post(notificaciones::create))
        .route("/notificaciones/todas", get(notificaciones::list_all))
        .route(
            "/notificaciones/:id",
            put(notificaciones::update).delete(notificaciones::delete),
        )
        .route_layer(from_fn(middleware::admin_only));

    let protected = Router::new()
        .route("/usuario/actual", get(auth::actual))
        .route("/personas", get(personas::list).post(personas::create))
        .route("/personas/:id", get(personas::detail).put(personas::update))
        .route("/medicos", get(medicos::list))
        .route("/medicos/disponibles", get(medicos::disponibles))
        .route("/medicos/:id", get(medicos::detail))
        .route("/medicos/:id/horarios", get(horarios::list_for_medico))
        .route("/citas", get(citas::list).post(citas::create))
        .route("/citas/:id", get(citas::detail))
        .route("/citas/:id/cancelar", put(citas::cancel))
        .route("/observaciones/cita/:cita_id", get(observaciones::by_cita))
        .route("/notificaciones", get(notificaciones::mine))
        .nest("/admin", admin)
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let public = Router::new()
        .route("/auth/registro", post(auth::registro))
        .route("/auth/login", post(auth::login));

    Router::new()
        .route("/health", get(health::check))
        .nest("/api", public.merge(protected))
        .layer(from_fn(middleware::request_log))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// CORS for the configured browser origins. Credentials are allowed, so
/// a wildcard origin is not accepted.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}
