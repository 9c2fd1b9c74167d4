//! Medico repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::entities::{horario, medico, DiaSemana};

/// Repository for medico-related database operations.
pub struct MedicoRepository;

impl MedicoRepository {
    /// Get all medicos ordered by id.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<medico::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(medico::Entity::find()
            .order_by_asc(medico::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get a single medico by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<medico::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(medico::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get the medico record attached to a usuario account.
    pub async fn get_by_usuario_id<C>(conn: &C, usuario_id: i32) -> Result<Option<medico::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(medico::Entity::find()
            .filter(medico::Column::UsuarioId.eq(usuario_id))
            .one(conn)
            .await?)
    }

    /// Search medicos by specialty (case-insensitive substring) and, optionally,
    /// by having a horario on the given weekday.
    ///
    /// The specialty match runs in Rust: SQLite's `lower()` only folds ASCII,
    /// so accented capitals like `Í` would never match in SQL.
    pub async fn search_available<C>(
        conn: &C,
        especialidad: Option<&str>,
        dia: Option<DiaSemana>,
    ) -> Result<Vec<medico::Model>>
    where
        C: ConnectionTrait,
    {
        let mut query = medico::Entity::find();

        if let Some(dia) = dia {
            query = query.filter(
                medico::Column::Id.in_subquery(
                    horario::Entity::find()
                        .filter(horario::Column::DiaSemana.eq(dia))
                        .select_only()
                        .column(horario::Column::MedicoId)
                        .into_query(),
                ),
            );
        }

        let medicos = query.order_by_asc(medico::Column::Id).all(conn).await?;

        Ok(match especialidad.map(str::to_lowercase) {
            Some(needle) => medicos
                .into_iter()
                .filter(|m| m.especialidad.to_lowercase().contains(&needle))
                .collect(),
            None => medicos,
        })
    }

    /// Insert a new medico.
    pub async fn create<C>(conn: &C, medico: medico::ActiveModel) -> Result<medico::Model>
    where
        C: ConnectionTrait,
    {
        Ok(medico.insert(conn).await?)
    }

    /// Update an existing medico.
    pub async fn update<C>(conn: &C, medico: medico::ActiveModel) -> Result<medico::Model>
    where
        C: ConnectionTrait,
    {
        Ok(medico.update(conn).await?)
    }

    /// Delete a medico, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(medico::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
