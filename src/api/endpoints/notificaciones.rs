//! Notificacion endpoints.
//!
//! Callers read their own notices; administradores manage all of them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{AppState, AuthUser, MessageResponse};
use crate::api::validation;
use crate::api::views::{self, NotificacionDetalle};
use crate::constants::{
    ERROR_CITA_NOT_FOUND, ERROR_NOTIFICACION_NOT_FOUND, ERROR_USUARIO_NOT_FOUND, MENSAJE_MAX_LEN,
    SUCCESS_NOTIFICACION_DELETED,
};
use crate::entities::{notificacion, TipoNotificacion};
use crate::repositories::{CitaRepository, NotificacionRepository, UsuarioRepository};

#[derive(Debug, Deserialize)]
pub struct CreateNotificacionRequest {
    pub usuario_id: i32,
    pub cita_id: i32,
    pub tipo: TipoNotificacion,
    pub mensaje: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNotificacionRequest {
    #[serde(default)]
    pub tipo: Option<TipoNotificacion>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

/// `GET /api/notificaciones`
pub async fn mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<NotificacionDetalle>>, ApiError> {
    let notificaciones = NotificacionRepository::get_for_usuario(state.db(), user.id).await?;
    Ok(Json(views::notificaciones_detalle(state.db(), notificaciones).await?))
}

/// `GET /api/admin/notificaciones/todas`
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<NotificacionDetalle>>, ApiError> {
    let notificaciones = NotificacionRepository::get_all(state.db()).await?;
    Ok(Json(views::notificaciones_detalle(state.db(), notificaciones).await?))
}

/// `POST /api/admin/notificaciones`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateNotificacionRequest>,
) -> Result<(StatusCode, Json<NotificacionDetalle>), ApiError> {
    validation::required_max("mensaje", &input.mensaje, MENSAJE_MAX_LEN)?;

    let txn = state.db().begin().await?;

    if UsuarioRepository::get_by_id(&txn, input.usuario_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_USUARIO_NOT_FOUND));
    }
    if CitaRepository::get_by_id(&txn, input.cita_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_CITA_NOT_FOUND));
    }

    let notificacion = NotificacionRepository::create(
        &txn,
        notificacion::ActiveModel {
            usuario_id: ActiveValue::Set(input.usuario_id),
            cita_id: ActiveValue::Set(input.cita_id),
            tipo: ActiveValue::Set(input.tipo),
            mensaje: ActiveValue::Set(input.mensaje.trim().to_string()),
            ..Default::default()
        },
    )
    .await?;
    let detalle = views::notificacion_detalle(&txn, notificacion).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `PUT /api/admin/notificaciones/:id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateNotificacionRequest>,
) -> Result<Json<NotificacionDetalle>, ApiError> {
    let mensaje = validation::non_blank(input.mensaje);
    validation::optional_max("mensaje", mensaje.as_deref(), MENSAJE_MAX_LEN)?;

    let txn = state.db().begin().await?;
    let existing = NotificacionRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_NOTIFICACION_NOT_FOUND))?;

    let mut active = existing.into_active_model();
    if let Some(tipo) = input.tipo {
        active.tipo = ActiveValue::Set(tipo);
    }
    if let Some(mensaje) = mensaje {
        active.mensaje = ActiveValue::Set(mensaje);
    }

    let notificacion = NotificacionRepository::update(&txn, active).await?;
    let detalle = views::notificacion_detalle(&txn, notificacion).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/notificaciones/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;
    if NotificacionRepository::delete_by_id(&txn, id).await? == 0 {
        return Err(ApiError::not_found(ERROR_NOTIFICACION_NOT_FOUND));
    }
    txn.commit().await?;

    Ok(Json(MessageResponse::new(SUCCESS_NOTIFICACION_DELETED)))
}
