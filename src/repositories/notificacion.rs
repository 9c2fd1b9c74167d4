//! Notificacion repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::notificacion;

/// Repository for notificacion-related database operations.
pub struct NotificacionRepository;

impl NotificacionRepository {
    /// Get a single notificacion by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<notificacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get all notificaciones, newest first.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<notificacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find()
            .order_by_desc(notificacion::Column::FechaEnvio)
            .order_by_desc(notificacion::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get notificaciones addressed to a usuario, newest first.
    pub async fn get_for_usuario<C>(conn: &C, usuario_id: i32) -> Result<Vec<notificacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find()
            .filter(notificacion::Column::UsuarioId.eq(usuario_id))
            .order_by_desc(notificacion::Column::FechaEnvio)
            .order_by_desc(notificacion::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get notificaciones tied to a cita, oldest first.
    pub async fn get_for_cita<C>(conn: &C, cita_id: i32) -> Result<Vec<notificacion::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find()
            .filter(notificacion::Column::CitaId.eq(cita_id))
            .order_by_asc(notificacion::Column::Id)
            .all(conn)
            .await?)
    }

    /// Count notificaciones tied to a cita.
    pub async fn count_for_cita<C>(conn: &C, cita_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find()
            .filter(notificacion::Column::CitaId.eq(cita_id))
            .count(conn)
            .await?)
    }

    /// Count notificaciones addressed to a usuario.
    pub async fn count_for_usuario<C>(conn: &C, usuario_id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::find()
            .filter(notificacion::Column::UsuarioId.eq(usuario_id))
            .count(conn)
            .await?)
    }

    /// Insert a new notificacion.
    pub async fn create<C>(conn: &C, notificacion: notificacion::ActiveModel) -> Result<notificacion::Model>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion.insert(conn).await?)
    }

    /// Update an existing notificacion.
    pub async fn update<C>(conn: &C, notificacion: notificacion::ActiveModel) -> Result<notificacion::Model>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion.update(conn).await?)
    }

    /// Delete a notificacion, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(notificacion::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
