//! Horario repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::horario;

/// Repository for horario-related database operations.
pub struct HorarioRepository;

impl HorarioRepository {
    /// Get a single horario by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<horario::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(horario::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get all horarios of a medico, ordered by id.
    pub async fn get_for_medico<C>(conn: &C, medico_id: i32) -> Result<Vec<horario::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(horario::Entity::find()
            .filter(horario::Column::MedicoId.eq(medico_id))
            .order_by_asc(horario::Column::Id)
            .all(conn)
            .await?)
    }

    /// Count horarios assigned to a medico.
    pub async fn count_for_medico<C>(conn: &C, medico_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(horario::Entity::find()
            .filter(horario::Column::MedicoId.eq(medico_id))
            .count(conn)
            .await?)
    }

    /// Insert a new horario.
    pub async fn create<C>(conn: &C, horario: horario::ActiveModel) -> Result<horario::Model>
    where
        C: ConnectionTrait,
    {
        Ok(horario.insert(conn).await?)
    }

    /// Update an existing horario.
    pub async fn update<C>(conn: &C, horario: horario::ActiveModel) -> Result<horario::Model>
    where
        C: ConnectionTrait,
    {
        Ok(horario.update(conn).await?)
    }

    /// Delete a horario, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(horario::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
