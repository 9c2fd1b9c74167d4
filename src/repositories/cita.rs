//! Cita repository for database operations.

use anyhow::Result;
use chrono::{Days, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{cita, EstadoCita};

/// Optional filters applied when listing citas.
#[derive(Debug, Clone, Default)]
pub struct CitaFilter {
    pub paciente_id: Option<i32>,
    pub medico_id: Option<i32>,
    pub estado: Option<EstadoCita>,
    /// Calendar day (UTC) the cita falls on.
    pub dia: Option<NaiveDate>,
}

/// Repository for cita-related database operations.
pub struct CitaRepository;

impl CitaRepository {
    /// Get a single cita by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<cita::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(cita::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get citas matching the filter, most recent appointment first.
    pub async fn find<C>(conn: &C, filter: &CitaFilter) -> Result<Vec<cita::Model>>
    where
        C: ConnectionTrait,
    {
        let mut query = cita::Entity::find();

        if let Some(paciente_id) = filter.paciente_id {
            query = query.filter(cita::Column::PacienteId.eq(paciente_id));
        }
        if let Some(medico_id) = filter.medico_id {
            query = query.filter(cita::Column::MedicoId.eq(medico_id));
        }
        if let Some(estado) = filter.estado {
            query = query.filter(cita::Column::Estado.eq(estado));
        }
        if let Some(dia) = filter.dia {
            let start = dia.and_hms_opt(0, 0, 0).map(|d| d.and_utc());
            let end = dia
                .checked_add_days(Days::new(1))
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc());
            if let (Some(start), Some(end)) = (start, end) {
                query = query
                    .filter(cita::Column::FechaCita.gte(start))
                    .filter(cita::Column::FechaCita.lt(end));
            }
        }

        Ok(query
            .order_by_desc(cita::Column::FechaCita)
            .order_by_desc(cita::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get every cita, most recent appointment first.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<cita::Model>>
    where
        C: ConnectionTrait,
    {
        Self::find(conn, &CitaFilter::default()).await
    }

    /// Count citas assigned to a medico.
    pub async fn count_for_medico<C>(conn: &C, medico_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(cita::Entity::find()
            .filter(cita::Column::MedicoId.eq(medico_id))
            .count(conn)
            .await?)
    }

    /// Count citas booked for a patient usuario.
    pub async fn count_for_paciente<C>(conn: &C, paciente_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(cita::Entity::find()
            .filter(cita::Column::PacienteId.eq(paciente_id))
            .count(conn)
            .await?)
    }

    /// Insert a new cita.
    pub async fn create<C>(conn: &C, cita: cita::ActiveModel) -> Result<cita::Model>
    where
        C: ConnectionTrait,
    {
        Ok(cita.insert(conn).await?)
    }

    /// Update an existing cita.
    pub async fn update<C>(conn: &C, cita: cita::ActiveModel) -> Result<cita::Model>
    where
        C: ConnectionTrait,
    {
        Ok(cita.update(conn).await?)
    }

    /// Delete a cita, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(cita::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
