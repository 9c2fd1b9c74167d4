//! Observacion entity: clinical note of a completed cita (one per cita).

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "observaciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub cita_id: i32,
    #[sea_orm(column_type = "Text")]
    pub observaciones: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub diagnostico: Option<String>,
    pub fecha_registro: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cita::Entity",
        from = "Column::CitaId",
        to = "super::cita::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Cita,
}

impl Related<super::cita::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cita.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.fecha_registro.is_not_set() {
            self.fecha_registro = ActiveValue::Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
