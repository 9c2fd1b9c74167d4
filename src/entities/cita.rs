//! Cita entity: an appointment between a patient usuario and a medico.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an appointment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EstadoCita {
    #[sea_orm(string_value = "programada")]
    #[serde(rename = "programada")]
    Programada,
    #[sea_orm(string_value = "cancelada")]
    #[serde(rename = "cancelada")]
    Cancelada,
    #[sea_orm(string_value = "completada")]
    #[serde(rename = "completada")]
    Completada,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "citas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub paciente_id: i32,
    pub medico_id: i32,
    #[sea_orm(indexed)]
    pub fecha_cita: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub motivo: String,
    #[sea_orm(indexed)]
    pub estado: EstadoCita,
    pub creada_en: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::PacienteId",
        to = "super::usuario::Column::Id",
        on_update = "Cascade"
    )]
    Paciente,
    #[sea_orm(
        belongs_to = "super::medico::Entity",
        from = "Column::MedicoId",
        to = "super::medico::Column::Id",
        on_update = "Cascade"
    )]
    Medico,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Paciente.def()
    }
}

impl Related<super::medico::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medico.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.creada_en.is_not_set() {
            self.creada_en = ActiveValue::Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
