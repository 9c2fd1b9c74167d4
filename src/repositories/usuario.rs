//! Usuario repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::{persona, usuario, Rol};

/// Repository for usuario-related database operations.
pub struct UsuarioRepository;

impl UsuarioRepository {
    /// Get a single usuario by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<usuario::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a usuario together with its persona.
    pub async fn get_with_persona<C>(
        conn: &C,
        id: i32,
    ) -> Result<Option<(usuario::Model, Option<persona::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find_by_id(id)
            .find_also_related(persona::Entity)
            .one(conn)
            .await?)
    }

    /// Get all usuarios with their personas, ordered by id.
    pub async fn get_all_with_persona<C>(conn: &C) -> Result<Vec<(usuario::Model, Option<persona::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find()
            .find_also_related(persona::Entity)
            .order_by_asc(usuario::Column::Id)
            .all(conn)
            .await?)
    }

    /// Look up a usuario by email address.
    pub async fn get_by_correo<C>(conn: &C, correo: &str) -> Result<Option<usuario::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find()
            .filter(usuario::Column::Correo.eq(correo))
            .one(conn)
            .await?)
    }

    /// Look up the usuario attached to a persona.
    pub async fn get_by_persona_id<C>(conn: &C, persona_id: i32) -> Result<Option<usuario::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find()
            .filter(usuario::Column::PersonaId.eq(persona_id))
            .one(conn)
            .await?)
    }

    /// Count usuarios holding a given role.
    pub async fn count_with_rol<C>(conn: &C, rol: Rol) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::find()
            .filter(usuario::Column::Rol.eq(rol))
            .count(conn)
            .await?)
    }

    /// Insert a new usuario.
    pub async fn create<C>(conn: &C, usuario: usuario::ActiveModel) -> Result<usuario::Model>
    where
        C: ConnectionTrait,
    {
        Ok(usuario.insert(conn).await?)
    }

    /// Update an existing usuario.
    pub async fn update<C>(conn: &C, usuario: usuario::ActiveModel) -> Result<usuario::Model>
    where
        C: ConnectionTrait,
    {
        Ok(usuario.update(conn).await?)
    }

    /// Delete a usuario, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(usuario::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
