//! Registration, login and current-user endpoints.
//!
//! - `POST /api/auth/registro` creates a persona plus a paciente usuario
//! - `POST /api/auth/login` exchanges credentials for an access token
//! - `GET /api/usuario/actual` returns the caller

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use sea_orm::{ActiveValue, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{AppState, AuthUser};
use crate::api::validation;
use crate::api::views::{self, UsuarioDetalle};
use crate::auth::password;
use crate::constants::{
    ERROR_BIRTH_DATE_FORMAT, ERROR_EMAIL_TAKEN, ERROR_INVALID_CREDENTIALS, ERROR_USUARIO_NOT_FOUND, NAME_MAX_LEN,
    PHONE_MAX_LEN, SUCCESS_REGISTRO,
};
use crate::entities::{persona, usuario, Genero, Rol};
use crate::repositories::{PersonaRepository, UsuarioRepository};
use crate::utils::datetime::parse_birth_date;

#[derive(Debug, Deserialize)]
pub struct RegistroRequest {
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub correo: String,
    #[serde(default)]
    pub telefono: Option<String>,
    /// `dd/mm/aaaa`
    pub fecha_nacimiento: String,
    pub genero: Genero,
    #[serde(default)]
    pub direccion: Option<String>,
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct RegistroResponse {
    pub mensaje: &'static str,
    pub usuario: UsuarioRegistrado,
}

#[derive(Debug, Serialize)]
pub struct UsuarioRegistrado {
    pub id: i32,
    pub correo: String,
    pub rol: Rol,
    pub persona: PersonaResumen,
}

#[derive(Debug, Serialize)]
pub struct PersonaResumen {
    pub nombre_completo: String,
}

/// `POST /api/auth/registro`
pub async fn registro(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegistroRequest>,
) -> Result<(StatusCode, Json<RegistroResponse>), ApiError> {
    validation::required_max("nombre", &input.nombre, NAME_MAX_LEN)?;
    validation::required_max("apellido_paterno", &input.apellido_paterno, NAME_MAX_LEN)?;
    validation::required_max("apellido_materno", &input.apellido_materno, NAME_MAX_LEN)?;
    validation::email(&input.correo)?;
    validation::password(&input.contrasena)?;
    let telefono = validation::non_blank(input.telefono);
    validation::optional_max("telefono", telefono.as_deref(), PHONE_MAX_LEN)?;

    let fecha_nacimiento =
        parse_birth_date(&input.fecha_nacimiento).map_err(|_| ApiError::bad_request(ERROR_BIRTH_DATE_FORMAT))?;

    let contrasena = password::hash_password_blocking(input.contrasena, state.password_iterations).await?;

    let txn = state.db().begin().await?;

    if UsuarioRepository::get_by_correo(&txn, input.correo.trim()).await?.is_some() {
        return Err(ApiError::conflict(ERROR_EMAIL_TAKEN));
    }

    let persona = PersonaRepository::create(
        &txn,
        persona::ActiveModel {
            nombre: ActiveValue::Set(input.nombre.trim().to_string()),
            apellido_paterno: ActiveValue::Set(input.apellido_paterno.trim().to_string()),
            apellido_materno: ActiveValue::Set(input.apellido_materno.trim().to_string()),
            telefono: ActiveValue::Set(telefono),
            fecha_nacimiento: ActiveValue::Set(Some(fecha_nacimiento)),
            genero: ActiveValue::Set(input.genero),
            direccion: ActiveValue::Set(validation::non_blank(input.direccion)),
            ..Default::default()
        },
    )
    .await?;

    let usuario = UsuarioRepository::create(
        &txn,
        usuario::ActiveModel {
            persona_id: ActiveValue::Set(persona.id),
            rol: ActiveValue::Set(Rol::Paciente),
            correo: ActiveValue::Set(input.correo.trim().to_string()),
            contrasena: ActiveValue::Set(contrasena),
            ..Default::default()
        },
    )
    .await
    .map_err(|err| ApiError::conflict_on_unique(err, ERROR_EMAIL_TAKEN))?;

    txn.commit().await?;
    log::info!("Registered paciente {} (usuario {})", usuario.correo, usuario.id);

    Ok((
        StatusCode::CREATED,
        Json(RegistroResponse {
            mensaje: SUCCESS_REGISTRO,
            usuario: UsuarioRegistrado {
                id: usuario.id,
                correo: usuario.correo,
                rol: usuario.rol,
                persona: PersonaResumen {
                    nombre_completo: persona.nombre_completo(),
                },
            },
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioDetalle,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validation::required("correo", &input.correo)?;
    validation::required("contrasena", &input.contrasena)?;

    let invalid = || ApiError::Unauthorized(ERROR_INVALID_CREDENTIALS.to_string());

    let usuario = UsuarioRepository::get_by_correo(state.db(), input.correo.trim())
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password_blocking(input.contrasena, usuario.contrasena.clone()).await? {
        log::warn!("Failed login for usuario {}", usuario.id);
        return Err(invalid());
    }

    let token = state.tokens.issue(usuario.id, usuario.rol)?;
    let usuario = views::usuario_detalle(state.db(), usuario).await?;

    Ok(Json(LoginResponse { token, usuario }))
}

/// `GET /api/usuario/actual`
pub async fn actual(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UsuarioDetalle>, ApiError> {
    views::usuario_detalle_by_id(state.db(), user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ERROR_USUARIO_NOT_FOUND))
}
