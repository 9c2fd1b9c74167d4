//! Persona endpoints.
//!
//! Read, create and update are open to any authenticated caller;
//! delete lives under `/api/admin`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use sea_orm::{ActiveValue, IntoActiveModel, TransactionTrait};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::types::{AppState, MessageResponse};
use crate::api::validation;
use crate::constants::{
    ERROR_PERSONA_HAS_USUARIO, ERROR_PERSONA_NOT_FOUND, NAME_MAX_LEN, PHONE_MAX_LEN, SUCCESS_PERSONA_DELETED,
};
use crate::entities::{persona, Genero};
use crate::repositories::{PersonaRepository, UsuarioRepository};

/// Body for both create and full update.
#[derive(Debug, Deserialize)]
pub struct PersonaRequest {
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    #[serde(default)]
    pub telefono: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub genero: Genero,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl PersonaRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validation::required_max("nombre", &self.nombre, NAME_MAX_LEN)?;
        validation::required_max("apellido_paterno", &self.apellido_paterno, NAME_MAX_LEN)?;
        validation::required_max("apellido_materno", &self.apellido_materno, NAME_MAX_LEN)?;
        validation::optional_max("telefono", self.telefono.as_deref(), PHONE_MAX_LEN)
    }

    fn apply(self, active: &mut persona::ActiveModel) {
        active.nombre = ActiveValue::Set(self.nombre.trim().to_string());
        active.apellido_paterno = ActiveValue::Set(self.apellido_paterno.trim().to_string());
        active.apellido_materno = ActiveValue::Set(self.apellido_materno.trim().to_string());
        active.telefono = ActiveValue::Set(validation::non_blank(self.telefono));
        active.fecha_nacimiento = ActiveValue::Set(self.fecha_nacimiento);
        active.genero = ActiveValue::Set(self.genero);
        active.direccion = ActiveValue::Set(validation::non_blank(self.direccion));
    }
}

/// `GET /api/personas`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<persona::Model>>, ApiError> {
    Ok(Json(PersonaRepository::get_all(state.db()).await?))
}

/// `GET /api/personas/:id`
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<persona::Model>, ApiError> {
    PersonaRepository::get_by_id(state.db(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(ERROR_PERSONA_NOT_FOUND))
}

/// `POST /api/personas`
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PersonaRequest>,
) -> Result<(StatusCode, Json<persona::Model>), ApiError> {
    input.validate()?;

    let txn = state.db().begin().await?;
    let mut active = persona::ActiveModel::default();
    input.apply(&mut active);
    let persona = PersonaRepository::create(&txn, active).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(persona)))
}

/// `PUT /api/personas/:id`
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PersonaRequest>,
) -> Result<Json<persona::Model>, ApiError> {
    input.validate()?;

    let txn = state.db().begin().await?;
    let existing = PersonaRepository::get_by_id(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found(ERROR_PERSONA_NOT_FOUND))?;

    let mut active = existing.into_active_model();
    input.apply(&mut active);
    let persona = PersonaRepository::update(&txn, active).await?;
    txn.commit().await?;

    Ok(Json(persona))
}

/// `DELETE /api/admin/personas/:id`
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let txn = state.db().begin().await?;

    if PersonaRepository::get_by_id(&txn, id).await?.is_none() {
        return Err(ApiError::not_found(ERROR_PERSONA_NOT_FOUND));
    }
    if UsuarioRepository::get_by_persona_id(&txn, id).await?.is_some() {
        return Err(ApiError::bad_request(ERROR_PERSONA_HAS_USUARIO));
    }

    PersonaRepository::delete_by_id(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(MessageResponse::new(SUCCESS_PERSONA_DELETED)))
}
