//! Medico endpoints.
//!
//! - `GET /api/medicos`, `GET /api/medicos/:id`
//! - `GET /api/medicos/disponibles?especialidad=&fecha=YYYY-MM-DD`
//! - admin: `POST /api/admin/medicos`, `PUT|DELETE /api/admin/medicos/:id`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::types::{AppState, MessageResponse};
use crate::api::validation;
use crate::api::views::{self, MedicoDetalle, MedicoDisponible};
use crate::constants::{
    ERROR_FILTER_DATE_FORMAT, ERROR_MEDICO_HAS_CITAS, ERROR_MEDICO_HAS_HORARIOS, ERROR_MEDICO_NOT_FOUND,
    ERROR_USUARIO_ALREADY_MEDICO, ERROR_USUARIO_NOT_FOUND, ERROR_USUARIO_NOT_MEDICO, SPECIALTY_MAX_LEN,
    SUCCESS_MEDICO_DELETED,
};
use crate::entities::{medico, Rol};
use crate::repositories::{CitaRepository, HorarioRepository, MedicoRepository, UsuarioRepository};
use crate::utils::datetime::{dia_semana, parse_date};

#[derive(Debug, Deserialize)]
pub struct CreateMedicoRequest {
    pub usuario_id: i32,
    pub especialidad: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMedicoRequest {
    #[serde(default)]
    pub especialidad: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisponiblesQuery {
    pub especialidad: Option<String>,
    pub fecha: Option<String>,
}

/// `GET /api/medicos`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MedicoDetalle>>, ApiError> {
    let medicos = MedicoRepository::get_all(state.db()).await?;
    Ok(Json(views::medicos_detalle(state.db(), medicos).await?))
}

/// `GET /api/medicos/:id`
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MedicoDetalle>, ApiError> {
    views::medico_detalle_by_id(state.db(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ERROR_MEDICO_NOT_FOUND))
}

/// `GET /api/medicos/disponibles`
///
/// `fecha` keeps only medicos with a horario on that weekday.
pub async fn disponibles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DisponiblesQuery>,
) -> Result<Json<Vec<MedicoDisponible>>, ApiError> {
    let especialidad = validation::non_blank(query.especialidad);
    let dia = match validation::non_blank(query.fecha) {
        Some(fecha) => {
            let date = parse_date(&fecha).map_err(|_| ApiError::bad_request(ERROR_FILTER_DATE_FORMAT))?;
            Some(dia_semana(date))
        }
        None => None,
    };

    let medicos = MedicoRepository::search_available(state.db(), especialidad.as_deref(), dia).await?;

    let mut out = Vec::with_capacity(medicos.len());
    for medico in medicos {
        out.push(views::medico_disponible(state.db(), medico).await?);
    }
    Ok(Json(out))
}

/// `POST /api/admin/medicos`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMedicoRequest>,
) -> Result<(StatusCode, Json<MedicoDetalle>), ApiError> {
    validation::required_max("especialidad", &input.especialidad, SPECIALTY_MAX_LEN)?;

    let txn = state.db().begin().await?;

    let usuario = UsuarioRepository::get_by_id(&txn, input.usuario_id)
        .await?
        .ok_or_else(|| ApiError::bad_request(ERROR_USUARIO_NOT_FOUND))?;
    if usuario.rol != Rol::Medico {
        return Err(ApiError::bad_request(ERROR_USUARIO_NOT_MEDICO));
    }
    if MedicoRepository::get_by_usuario_id(&txn, usuario.id).await?.is_some() {
        return Err(ApiError::conflict(ERROR_USUARIO_ALREADY_MEDICO));
    }

    let medico = MedicoRepository::create(
        &txn,
        medico::ActiveModel {
            usuario_id: ActiveValue::Set(usuario.id),
            especialidad: ActiveValue::Set(input.especialidad.trim().to_string()),
            ..Default::default()
        },
    )
    .await?;
    let detalle = views::medico_detalle(&txn, medico).await?;
    txn.commit().await?;

    log::info!("Registered medico {} for usuario {}", detalle.medico.id, usuario.id);
    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `PUT /api/admin/medicos/:id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateMedicoRequest>,
) -> Result<Json<MedicoDetalle>, ApiError> {
    let especialidad = validation::non_blank(input.especialidad);
    validation::optional_max("especialidad", especialidad.as_deref(), SPECIALTY_MAX_LEN)?;

    let txn = state.db().begin().await?;
    let existing = MedicoRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_MEDICO_NOT_FOUND))?;

    let medico = match especialidad {
        Some(especialidad) => {
            let mut active = existing.into_active_model();
            active.especialidad = ActiveValue::Set(especialidad);
            MedicoRepository::update(&txn, active).await?
        }
        None => existing,
    };
    let detalle = views::medico_detalle(&txn, medico).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/medicos/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;

    if MedicoRepository::get_by_id(&txn, id).await?.is_none() {
        return Err(ApiError::not_found(ERROR_MEDICO_NOT_FOUND));
    }
    if HorarioRepository::count_for_medico(&txn, id).await? > 0 {
        return Err(ApiError::bad_request(ERROR_MEDICO_HAS_HORARIOS));
    }
    if CitaRepository::count_for_medico(&txn, id).await? > 0 {
        return Err(ApiError::bad_request(ERROR_MEDICO_HAS_CITAS));
    }

    MedicoRepository::delete_by_id(&txn, id).await?;
    txn.commit().await?;
    log::info!("Deleted medico {id}");

    Ok(Json(MessageResponse::new(SUCCESS_MEDICO_DELETED)))
}
