//! Appointment endpoints.
//!
//! - `POST /api/citas` books a cita
//! - `GET /api/citas` lists the caller's citas (by role)
//! - `GET /api/citas/:id` shows one cita with its notificaciones
//! - `PUT /api/citas/:id/cancelar` cancels under the 24h rule
//! - admin: `GET /api/admin/citas/todas`, `PUT|DELETE /api/admin/citas/:id`

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveEnum, ActiveValue, ConnectionTrait, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::types::{AppState, AuthUser, MessageResponse};
use crate::api::validation;
use crate::api::views::{self, CitaDetalle};
use crate::constants::{
    CANCELLATION_NOTICE, ERROR_CITA_BOOK_FORBIDDEN, ERROR_CITA_FORBIDDEN, ERROR_CITA_HAS_NOTIFICACIONES,
    ERROR_CITA_NOT_FOUND, ERROR_FILTER_DATE_FORMAT, ERROR_FILTER_ESTADO, ERROR_MEDICO_FOR_USUARIO_NOT_FOUND,
    ERROR_MEDICO_NOT_FOUND, ERROR_PACIENTE_NOT_FOUND, MOTIVO_MAX_LEN, SUCCESS_CITA_CANCELADA, SUCCESS_CITA_DELETED,
};
use crate::entities::{cita, notificacion, EstadoCita, Rol, TipoNotificacion};
use crate::policies;
use crate::repositories::{
    CitaFilter, CitaRepository, MedicoRepository, NotificacionRepository, ObservacionRepository, UsuarioRepository,
};
use crate::utils::datetime::parse_date;

#[derive(Debug, Deserialize)]
pub struct CreateCitaRequest {
    pub paciente_id: i32,
    pub medico_id: i32,
    /// RFC 3339 timestamp
    pub fecha_cita: DateTime<Utc>,
    pub motivo: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCitaRequest {
    #[serde(default)]
    pub fecha_cita: Option<DateTime<Utc>>,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub estado: Option<EstadoCita>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CitasQuery {
    /// `programada`, `cancelada` or `completada`; blank means any
    pub estado: Option<String>,
    /// `YYYY-MM-DD`
    pub fecha: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CancelacionResponse {
    pub message: &'static str,
    pub cita: CitaDetalle,
}

/// Paciente, the cita's medico, or an administrador may see a cita.
pub(crate) async fn ensure_can_view<C>(conn: &C, user: &AuthUser, cita: &cita::Model) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    if user.is_admin() || cita.paciente_id == user.id {
        return Ok(());
    }
    if user.rol == Rol::Medico {
        if let Some(medico) = MedicoRepository::get_by_usuario_id(conn, user.id).await? {
            if medico.id == cita.medico_id {
                return Ok(());
            }
        }
    }
    Err(ApiError::forbidden(ERROR_CITA_FORBIDDEN))
}

/// `POST /api/citas`
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<CreateCitaRequest>,
) -> Result<(StatusCode, Json<CitaDetalle>), ApiError> {
    validation::required_max("motivo", &input.motivo, MOTIVO_MAX_LEN)?;
    if user.rol == Rol::Paciente && input.paciente_id != user.id {
        return Err(ApiError::forbidden(ERROR_CITA_BOOK_FORBIDDEN));
    }

    let txn = state.db().begin().await?;

    if UsuarioRepository::get_by_id(&txn, input.paciente_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_PACIENTE_NOT_FOUND));
    }
    if MedicoRepository::get_by_id(&txn, input.medico_id).await?.is_none() {
        return Err(ApiError::bad_request(ERROR_MEDICO_NOT_FOUND));
    }
    policies::ensure_future(input.fecha_cita, Utc::now())?;

    let cita = CitaRepository::create(
        &txn,
        cita::ActiveModel {
            paciente_id: ActiveValue::Set(input.paciente_id),
            medico_id: ActiveValue::Set(input.medico_id),
            fecha_cita: ActiveValue::Set(input.fecha_cita),
            motivo: ActiveValue::Set(input.motivo.trim().to_string()),
            estado: ActiveValue::Set(EstadoCita::Programada),
            ..Default::default()
        },
    )
    .await?;
    let detalle = views::cita_detalle(&txn, cita, false).await?;
    txn.commit().await?;

    log::info!(
        "Cita {} booked for paciente {} with medico {}",
        detalle.cita.id,
        detalle.cita.paciente_id,
        detalle.cita.medico_id
    );
    Ok((StatusCode::CREATED, Json(detalle)))
}

/// `GET /api/citas`
///
/// Pacientes see their own citas, medicos the ones assigned to them,
/// administradores every cita.
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<CitasQuery>,
) -> Result<Json<Vec<CitaDetalle>>, ApiError> {
    let mut filter = CitaFilter::default();
    if let Some(estado) = validation::non_blank(query.estado) {
        let estado = EstadoCita::try_from_value(&estado).map_err(|_| ApiError::bad_request(ERROR_FILTER_ESTADO))?;
        filter.estado = Some(estado);
    }
    if let Some(fecha) = validation::non_blank(query.fecha) {
        filter.dia = Some(parse_date(&fecha).map_err(|_| ApiError::bad_request(ERROR_FILTER_DATE_FORMAT))?);
    }

    match user.rol {
        Rol::Paciente => filter.paciente_id = Some(user.id),
        Rol::Medico => {
            let medico = MedicoRepository::get_by_usuario_id(state.db(), user.id)
                .await?
                .ok_or_else(|| ApiError::not_found(ERROR_MEDICO_FOR_USUARIO_NOT_FOUND))?;
            filter.medico_id = Some(medico.id);
        }
        Rol::Administrador => {}
    }

    let citas = CitaRepository::find(state.db(), &filter).await?;
    Ok(Json(views::citas_detalle(state.db(), citas).await?))
}

/// `GET /api/citas/:id`
pub async fn detail(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CitaDetalle>, ApiError> {
    let cita = CitaRepository::get_by_id(state.db(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_CITA_NOT_FOUND))?;
    ensure_can_view(state.db(), &user, &cita).await?;

    Ok(Json(views::cita_detalle(state.db(), cita, true).await?))
}

/// `PUT /api/citas/:id/cancelar`
///
/// The estado change and the cancellation notice commit together.
pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CancelacionResponse>, ApiError> {
    let txn = state.db().begin().await?;

    let cita = CitaRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_CITA_NOT_FOUND))?;
    policies::check_cancellation(&cita, user.id, user.rol, Utc::now())?;

    let paciente_id = cita.paciente_id;
    let mut active = cita.into_active_model();
    active.estado = ActiveValue::Set(EstadoCita::Cancelada);
    let cita = CitaRepository::update(&txn, active).await?;

    NotificacionRepository::create(
        &txn,
        notificacion::ActiveModel {
            usuario_id: ActiveValue::Set(paciente_id),
            cita_id: ActiveValue::Set(cita.id),
            tipo: ActiveValue::Set(TipoNotificacion::Cancelacion),
            mensaje: ActiveValue::Set(CANCELLATION_NOTICE.to_string()),
            ..Default::default()
        },
    )
    .await?;

    let detalle = views::cita_detalle(&txn, cita, true).await?;
    txn.commit().await?;

    log::info!("Cita {id} cancelled by usuario {}", user.id);
    Ok(Json(CancelacionResponse {
        message: SUCCESS_CITA_CANCELADA,
        cita: detalle,
    }))
}

/// `GET /api/admin/citas/todas`
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<CitaDetalle>>, ApiError> {
    let citas = CitaRepository::get_all(state.db()).await?;
    Ok(Json(views::citas_detalle(state.db(), citas).await?))
}

/// `PUT /api/admin/citas/:id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateCitaRequest>,
) -> Result<Json<CitaDetalle>, ApiError> {
    let motivo = validation::non_blank(input.motivo);
    validation::optional_max("motivo", motivo.as_deref(), MOTIVO_MAX_LEN)?;
    if let Some(fecha) = input.fecha_cita {
        policies::ensure_future(fecha, Utc::now())?;
    }

    let txn = state.db().begin().await?;
    let existing = CitaRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_CITA_NOT_FOUND))?;

    let mut active = existing.into_active_model();
    if let Some(fecha) = input.fecha_cita {
        active.fecha_cita = ActiveValue::Set(fecha);
    }
    if let Some(motivo) = motivo {
        active.motivo = ActiveValue::Set(motivo);
    }
    if let Some(estado) = input.estado {
        active.estado = ActiveValue::Set(estado);
    }

    let cita = CitaRepository::update(&txn, active).await?;
    let detalle = views::cita_detalle(&txn, cita, false).await?;
    txn.commit().await?;

    Ok(Json(detalle))
}

/// `DELETE /api/admin/citas/:id`
///
/// Removes the cita's observacion too. Citas with notificaciones are kept.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;

    if CitaRepository::get_by_id(&txn, id).await?.is_none() {
        return Err(ApiError::not_found(ERROR_CITA_NOT_FOUND));
    }
    if NotificacionRepository::count_for_cita(&txn, id).await? > 0 {
        return Err(ApiError::bad_request(ERROR_CITA_HAS_NOTIFICACIONES));
    }

    ObservacionRepository::delete_for_cita(&txn, id).await?;
    CitaRepository::delete_by_id(&txn, id).await?;
    txn.commit().await?;
    log::info!("Deleted cita {id}");

    Ok(Json(MessageResponse::new(SUCCESS_CITA_DELETED)))
}
