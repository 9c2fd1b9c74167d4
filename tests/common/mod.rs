#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cmedicas::api::{build_router, AppState};
use cmedicas::config::{AuthConfig, BootstrapAdmin};
use cmedicas::storage::Storage;

pub const ADMIN_CORREO: &str = "admin@cmedicas.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const PASSWORD: &str = "paciente-123";
pub const ITERATIONS: u32 = 1_000;
pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// In-memory database with a bootstrapped administrator.
pub async fn spawn_app() -> TestApp {
    let storage = Storage::in_memory().await.unwrap();
    storage
        .ensure_admin(
            &BootstrapAdmin {
                correo: ADMIN_CORREO.to_string(),
                contrasena: ADMIN_PASSWORD.to_string(),
                nombre: "Administrador".to_string(),
            },
            ITERATIONS,
        )
        .await
        .unwrap();

    let auth = AuthConfig {
        jwt_secret: JWT_SECRET.to_string(),
        token_ttl_hours: 24,
        password_iterations: ITERATIONS,
        bootstrap_admin: None,
    };
    let state = AppState::new(storage, &auth);
    let router = build_router(state.clone(), &["http://localhost:4200".to_string()]);

    TestApp { router, state }
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.send(request).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, Some(token), None).await
    }

    pub async fn login(&self, correo: &str, contrasena: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "correo": correo, "contrasena": contrasena })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_CORREO, ADMIN_PASSWORD).await
    }

    /// Register a paciente through the public endpoint. Returns (usuario id, token).
    pub async fn register_paciente(&self, correo: &str) -> (i32, String) {
        let (status, body) = self
            .request("POST", "/api/auth/registro", None, Some(registro_body(correo)))
            .await;
        assert_eq!(status, StatusCode::CREATED, "registro failed: {body}");
        let id = body["usuario"]["id"].as_i64().unwrap() as i32;
        let token = self.login(correo, PASSWORD).await;
        (id, token)
    }

    /// Create persona, medico usuario and medico record. Returns (usuario id, medico id, token).
    pub async fn create_medico(&self, admin: &str, correo: &str, especialidad: &str) -> (i32, i32, String) {
        let usuario_id = self.create_usuario(admin, correo, "medico").await;

        let (status, body) = self
            .post(
                "/api/admin/medicos",
                admin,
                json!({ "usuario_id": usuario_id, "especialidad": especialidad }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "medico failed: {body}");
        let medico_id = body["id"].as_i64().unwrap() as i32;

        let token = self.login(correo, PASSWORD).await;
        (usuario_id, medico_id, token)
    }

    /// Create persona plus usuario with the given rol. Returns the usuario id.
    pub async fn create_usuario(&self, admin: &str, correo: &str, rol: &str) -> i32 {
        let persona_id = self.create_persona(admin, "Laura").await;
        let (status, body) = self
            .post(
                "/api/admin/usuarios",
                admin,
                json!({ "persona_id": persona_id, "rol": rol, "correo": correo, "contrasena": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "usuario failed: {body}");
        body["id"].as_i64().unwrap() as i32
    }

    pub async fn create_persona(&self, token: &str, nombre: &str) -> i32 {
        let (status, body) = self
            .post(
                "/api/personas",
                token,
                json!({
                    "nombre": nombre,
                    "apellido_paterno": "Gómez",
                    "apellido_materno": "Ruiz",
                    "genero": "femenino"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "persona failed: {body}");
        body["id"].as_i64().unwrap() as i32
    }

    pub async fn create_cita(&self, token: &str, paciente_id: i32, medico_id: i32, fecha: DateTime<Utc>) -> Value {
        let (status, body) = self
            .post(
                "/api/citas",
                token,
                json!({
                    "paciente_id": paciente_id,
                    "medico_id": medico_id,
                    "fecha_cita": fecha.to_rfc3339(),
                    "motivo": "Revisión general"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "cita failed: {body}");
        body
    }
}

pub fn registro_body(correo: &str) -> Value {
    json!({
        "nombre": "Ana",
        "apellido_paterno": "López",
        "apellido_materno": "Pérez",
        "correo": correo,
        "telefono": "5551234567",
        "fecha_nacimiento": "15/03/1990",
        "genero": "femenino",
        "direccion": "Calle 1 #23",
        "contrasena": PASSWORD
    })
}
