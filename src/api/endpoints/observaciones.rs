//! Clinical notes attached to completed citas.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::endpoints::citas::ensure_can_view;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{AppState, AuthUser, MessageResponse};
use crate::api::validation;
use crate::api::views::{self, ObservacionDetalle};
use crate::constants::{
    ERROR_CITA_NOT_FOUND, ERROR_OBSERVACION_EXISTS, ERROR_OBSERVACION_FOR_CITA_NOT_FOUND,
    ERROR_OBSERVACION_NOT_FOUND, ERROR_OBSERVACION_REQUIRES_COMPLETED, SUCCESS_OBSERVACION_DELETED,
};
use crate::entities::{observacion, EstadoCita};
use crate::repositories::{CitaRepository, ObservacionRepository};

#[derive(Debug, Deserialize)]
pub struct CreateObservacionRequest {
    pub cita_id: i32,
    pub observaciones: String,
    #[serde(default)]
    pub diagnostico: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateObservacionRequest {
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub diagnostico: Option<String>,
}

/// `GET /api/observaciones/cita/:cita_id`
pub async fn by_cita(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(cita_id): ApiPath<i32>,
) -> Result<Json<ObservacionDetalle>, ApiError> {
    let cita = CitaRepository::get_by_id(state.db(), cita_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_CITA_NOT_FOUND))?;
    ensure_can_view(state.db(), &user, &cita).await?;

    let observacion = ObservacionRepository::get_by_cita_id(state.db(), cita_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_OBSERVACION_FOR_CITA_NOT_FOUND))?;

    Ok(Json(ObservacionDetalle {
        observacion,
        cita: Some(cita),
    }))
}

/// `POST /api/admin/observaciones`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateObservacionRequest>,
) -> Result<(StatusCode, Json<ObservacionDetalle>), ApiError> {
    validation::required("observaciones", &input.observaciones)?;

    let txn = state.db().begin().await?;

    let cita = CitaRepository::get_by_id(&txn, input.cita_id)
        .await?
        .ok_or_else(|| ApiError::bad_request(ERROR_CITA_NOT_FOUND))?;
    if cita.estado != EstadoCita::Completada {
        return Err(ApiError::bad_request(ERROR_OBSERVACION_REQUIRES_COMPLETED));
    }
    if ObservacionRepository::get_by_cita_id(&txn, cita.id).await?.is_some() {
        return Err(ApiError::conflict(ERROR_OBSERVACION_EXISTS));
    }

    let observacion = ObservacionRepository::create(
        &txn,
        observacion::ActiveModel {
            cita_id: ActiveValue::Set(cita.id),
            observaciones: ActiveValue::Set(input.observaciones.trim().to_string()),
            diagnostico: ActiveValue::Set(validation::non_blank(input.diagnostico)),
            ..Default::default()
        },
    )
    .await?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ObservacionDetalle {
            observacion,
            cita: Some(cita),
        }),
    ))
}

/// `PUT /api/admin/observaciones/:id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateObservacionRequest>,
) -> Result<Json<ObservacionDetalle>, ApiError> {
    let txn = state.db().begin().await?;
    let existing = ObservacionRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_OBSERVACION_NOT_FOUND))?;

    let mut active = existing.into_active_model();
    if let Some(observaciones) = validation::non_blank(input.observaciones) {
        active.observaciones = ActiveValue::Set(observaciones);
    }
    if let Some(diagnostico) = validation::non_blank(input.diagnostico) {
        active.diagnostico = ActiveValue::Set(Some(diagnostico));
    }

    let observacion = ObservacionRepository::update(&txn, active).await?;
    let detalle = views::observacion_detalle(&txn, observacion).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/observaciones/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;
    if ObservacionRepository::delete_by_id(&txn, id).await? == 0 {
        return Err(ApiError::not_found(ERROR_OBSERVACION_NOT_FOUND));
    }
    txn.commit().await?;

    Ok(Json(MessageResponse::new(SUCCESS_OBSERVACION_DELETED)))
}
