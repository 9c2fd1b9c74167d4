//! Weekly schedule endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveTime;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{AppState, MessageResponse};
use crate::api::views::{self, HorarioDetalle};
use crate::constants::{ERROR_HORARIO_NOT_FOUND, ERROR_MEDICO_NOT_FOUND, SUCCESS_HORARIO_DELETED};
use crate::entities::{horario, DiaSemana};
use crate::policies;
use crate::repositories::{HorarioRepository, MedicoRepository};
use crate::utils::datetime::{deserialize_optional_time, deserialize_time};

#[derive(Debug, Deserialize)]
pub struct CreateHorarioRequest {
    pub dia_semana: DiaSemana,
    #[serde(deserialize_with = "deserialize_time")]
    pub hora_inicio: NaiveTime,
    #[serde(deserialize_with = "deserialize_time")]
    pub hora_fin: NaiveTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHorarioRequest {
    #[serde(default)]
    pub dia_semana: Option<DiaSemana>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub hora_inicio: Option<NaiveTime>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub hora_fin: Option<NaiveTime>,
}

/// `GET /api/medicos/:id/horarios`
pub async fn list_for_medico(
    State(state): State<AppState>,
    ApiPath(medico_id): ApiPath<i32>,
) -> Result<Json<Vec<horario::Model>>, ApiError> {
    if MedicoRepository::get_by_id(state.db(), medico_id).await?.is_none() {
        return Err(ApiError::not_found(ERROR_MEDICO_NOT_FOUND));
    }
    Ok(Json(HorarioRepository::get_for_medico(state.db(), medico_id).await?))
}

/// `POST /api/admin/medicos/:id/horarios`
pub async fn create(
    State(state): State<AppState>,
    ApiPath(medico_id): ApiPath<i32>,
    ApiJson(input): ApiJson<CreateHorarioRequest>,
) -> Result<(StatusCode, Json<HorarioDetalle>), ApiError> {
    policies::ensure_time_range(input.hora_inicio, input.hora_fin)?;

    let txn = state.db().begin().await?;
    if MedicoRepository::get_by_id(&txn, medico_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_MEDICO_NOT_FOUND));
    }

    let horario = HorarioRepository::create(
        &txn,
        horario::ActiveModel {
            medico_id: ActiveValue::Set(medico_id),
            dia_semana: ActiveValue::Set(input.dia_semana),
            hora_inicio: ActiveValue::Set(input.hora_inicio),
            hora_fin: ActiveValue::Set(input.hora_fin),
            ..Default::default()
        },
    )
    .await?;
    let detalle = views::horario_detalle(&txn, horario).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `PUT /api/admin/horarios/:id`
///
/// The time range is checked on the merged record.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateHorarioRequest>,
) -> Result<Json<HorarioDetalle>, ApiError> {
    let txn = state.db().begin().await?;
    let existing = HorarioRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_HORARIO_NOT_FOUND))?;

    let inicio = input.hora_inicio.unwrap_or(existing.hora_inicio);
    let fin = input.hora_fin.unwrap_or(existing.hora_fin);
    policies::ensure_time_range(inicio, fin)?;

    let mut active = existing.into_active_model();
    if let Some(dia) = input.dia_semana {
        active.dia_semana = ActiveValue::Set(dia);
    }
    active.hora_inicio = ActiveValue::Set(inicio);
    active.hora_fin = ActiveValue::Set(fin);

    let horario = HorarioRepository::update(&txn, active).await?;
    let detalle = views::horario_detalle(&txn, horario).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/horarios/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;
    if HorarioRepository::delete_by_id(&txn, id).await? == 0 {
        return Err(ApiError::not_found(ERROR_HORARIO_NOT_FOUND));
    }
    txn.commit().await?;

    Ok(Json(MessageResponse::new(SUCCESS_HORARIO_DELETED)))
}
