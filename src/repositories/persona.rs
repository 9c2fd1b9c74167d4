//! Persona repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::persona;

/// Repository for persona-related database operations.
pub struct PersonaRepository;

impl PersonaRepository {
    /// Get all personas ordered by id.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<persona::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(persona::Entity::find()
            .order_by_asc(persona::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get a single persona by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<persona::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(persona::Entity::find_by_id(id).one(conn).await?)
    }

    /// Insert a new persona.
    pub async fn create<C>(conn: &C, persona: persona::ActiveModel) -> Result<persona::Model>
    where
        C: ConnectionTrait,
    {
        Ok(persona.insert(conn).await?)
    }

    /// Update an existing persona.
    pub async fn update<C>(conn: &C, persona: persona::ActiveModel) -> Result<persona::Model>
    where
        C: ConnectionTrait,
    {
        Ok(persona.update(conn).await?)
    }

    /// Delete a persona, returning the number of deleted rows.
    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(persona::Entity::delete_by_id(id).exec(conn).await?.rows_affected)
    }
}
