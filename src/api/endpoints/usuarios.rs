//! Administrator usuario management under `/api/admin/usuarios`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{AppState, MessageResponse};
use crate::api::validation;
use crate::api::views::{self, UsuarioDetalle};
use crate::auth::password;
use crate::constants::{
    ERROR_EMAIL_TAKEN, ERROR_PERSONA_ALREADY_USUARIO, ERROR_PERSONA_NOT_FOUND, ERROR_USUARIO_HAS_RECORDS,
    ERROR_USUARIO_NOT_FOUND, SUCCESS_USUARIO_DELETED,
};
use crate::entities::{usuario, Rol};
use crate::repositories::{
    CitaRepository, MedicoRepository, NotificacionRepository, PersonaRepository, UsuarioRepository,
};

#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub persona_id: i32,
    pub rol: Rol,
    pub correo: String,
    pub contrasena: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUsuarioRequest {
    #[serde(default)]
    pub rol: Option<Rol>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub contrasena: Option<String>,
}

/// `GET /api/admin/usuarios`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UsuarioDetalle>>, ApiError> {
    let usuarios = UsuarioRepository::get_all_with_persona(state.db())
        .await?
        .into_iter()
        .map(|(usuario, persona)| UsuarioDetalle { usuario, persona })
        .collect();
    Ok(Json(usuarios))
}

/// `GET /api/admin/usuarios/:id`
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<UsuarioDetalle>, ApiError> {
    views::usuario_detalle_by_id(state.db(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ERROR_USUARIO_NOT_FOUND))
}

/// `POST /api/admin/usuarios`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUsuarioRequest>,
) -> Result<(StatusCode, Json<UsuarioDetalle>), ApiError> {
    validation::email(&input.correo)?;
    validation::password(&input.contrasena)?;
    let contrasena = password::hash_password_blocking(input.contrasena, state.password_iterations).await?;

    let txn = state.db().begin().await?;

    if PersonaRepository::get_by_id(&txn, input.persona_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_PERSONA_NOT_FOUND));
    }
    if UsuarioRepository::get_by_persona_id(&txn, input.persona_id).await?.is_some() {
        return Err(ApiError::conflict(ERROR_PERSONA_ALREADY_USUARIO));
    }
    if UsuarioRepository::get_by_correo(&txn, input.correo.trim()).await?.is_some() {
        return Err(ApiError::conflict(ERROR_EMAIL_TAKEN));
    }

    let usuario = UsuarioRepository::create(
        &txn,
        usuario::ActiveModel {
            persona_id: ActiveValue::Set(input.persona_id),
            rol: ActiveValue::Set(input.rol),
            correo: ActiveValue::Set(input.correo.trim().to_string()),
            contrasena: ActiveValue::Set(contrasena),
            ..Default::default()
        },
    )
    .await
    .map_err(|err| ApiError::conflict_on_unique(err, ERROR_EMAIL_TAKEN))?;
    let detalle = views::usuario_detalle(&txn, usuario).await?;

    txn.commit().await?;
    log::info!("Created usuario {} with rol {:?}", detalle.usuario.id, detalle.usuario.rol);

    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `PUT /api/admin/usuarios/:id`
///
/// Only the fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateUsuarioRequest>,
) -> Result<Json<UsuarioDetalle>, ApiError> {
    let correo = validation::non_blank(input.correo);
    if let Some(correo) = &correo {
        validation::email(correo)?;
    }
    let contrasena = match input.contrasena.filter(|c| !c.is_empty()) {
        Some(contrasena) => {
            validation::password(&contrasena)?;
            Some(password::hash_password_blocking(contrasena, state.password_iterations).await?)
        }
        None => None,
    };

    let txn = state.db().begin().await?;

    let existing = UsuarioRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_USUARIO_NOT_FOUND))?;

    if let Some(correo) = &correo {
        if let Some(other) = UsuarioRepository::get_by_correo(&txn, correo).await? {
            if other.id != existing.id {
                return Err(ApiError::conflict(ERROR_EMAIL_TAKEN));
            }
        }
    }

    let mut active = existing.into_active_model();
    if let Some(rol) = input.rol {
        active.rol = ActiveValue::Set(rol);
    }
    if let Some(correo) = correo {
        active.correo = ActiveValue::Set(correo);
    }
    if let Some(contrasena) = contrasena {
        active.contrasena = ActiveValue::Set(contrasena);
    }

    let usuario = UsuarioRepository::update(&txn, active)
        .await
        .map_err(|err| ApiError::conflict_on_unique(err, ERROR_EMAIL_TAKEN))?;
    let detalle = views::usuario_detalle(&txn, usuario).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/usuarios/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;

    if UsuarioRepository::get_by_id(&txn, id).await?.is_none() {
        return Err(ApiError::not_found(ERROR_USUARIO_NOT_FOUND));
    }

    let is_medico = MedicoRepository::get_by_usuario_id(&txn, id).await?.is_some();
    let citas = CitaRepository::count_for_paciente(&txn, id).await?;
    let notificaciones = NotificacionRepository::count_for_usuario(&txn, id).await?;
    if is_medico || citas > 0 || notificaciones > 0 {
        return Err(ApiError::bad_request(ERROR_USUARIO_HAS_RECORDS));
    }

    UsuarioRepository::delete_by_id(&txn, id).await?;
    txn.commit().await?;
    log::info!("Deleted usuario {id}");

    Ok(Json(MessageResponse::new(SUCCESS_USUARIO_DELETED)))
}
