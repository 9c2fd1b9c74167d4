//! Observacion repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::observacion;

/// Repository for observacion-related database operations.
pub struct ObservacionRepository;

impl ObservacionRepository {
    /// Get a single observacion by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<observacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(observacion::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the observacion recorded for a cita, if any.
    pub async fn get_by_cita_id<C>(conn: &C, cita_id: i32) -> Result<Option<observacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(observacion::Entity::find()
            .filter(observacion::Column::CitaId.eq(cita_id))
            .one(conn)
            .await?)
    }

    /// Insert a new observacion.
    pub async fn create<C>(conn: &C, observacion: observacion::ActiveModel) -> Result<observacion::Model>
    where
        C: ConnectionTrait,
    {
        Ok(observacion.insert(conn).await?)
    }

    /// Update an existing observacion.
    pub async fn update<C>(conn: &C, observacion: observacion::ActiveModel) -> Result<observacion::Model>
    where
        C: ConnectionTrait,
    {
        Ok(observacion.update(conn).await?)
    }

    /// Delete an observacion, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(observacion::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }

    /// Delete the observacion attached to a cita.
    pub async fn delete_for_cita<C>(conn: &C, cita_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(observacion::Entity::delete_many()
            .filter(observacion::Column::CitaId.eq(cita_id))
            .exec(conn)
            .await?
            .rows_affected)
    }
}
