//! Usuario entity: a system account bound to exactly one persona.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Rol {
    #[sea_orm(string_value = "paciente")]
    #[serde(rename = "paciente")]
    Paciente,
    #[sea_orm(string_value = "medico")]
    #[serde(rename = "medico")]
    Medico,
    #[sea_orm(string_value = "administrador")]
    #[serde(rename = "administrador")]
    Administrador,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub persona_id: i32,
    pub rol: Rol,
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub correo: String,
    #[serde(skip_serializing, default)]
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub contrasena: String,
    pub creado_en: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::persona::Entity",
        from = "Column::PersonaId",
        to = "super::persona::Column::Id",
        on_update = "Cascade"
    )]
    Persona,
}

impl Related<super::persona::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Persona.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.creado_en.is_not_set() {
            self.creado_en = ActiveValue::Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
