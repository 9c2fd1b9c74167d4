use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum TipoNotificacion {
    #[sea_orm(string_value = "confirmación")]
    #[serde(rename = "confirmación")]
    Confirmacion,
    #[sea_orm(string_value = "recordatorio")]
    #[serde(rename = "recordatorio")]
    Recordatorio,
    #[sea_orm(string_value = "cancelación")]
    #[serde(rename = "cancelación")]
    Cancelacion,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notificaciones")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub usuario_id: i32,
    pub cita_id: i32,
    pub tipo: TipoNotificacion,
    #[sea_orm(column_type = "Text")]
    pub mensaje: String,
    pub fecha_envio: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::Id",
        on_update = "Cascade"
    )]
    Usuario,
    #[sea_orm(
        belongs_to = "super::cita::Entity",
        from = "Column::CitaId",
        to = "super::cita::Column::Id",
        on_update = "Cascade"
    )]
    Cita,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
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
        if insert && self.fecha_envio.is_not_set() {
            self.fecha_envio = ActiveValue::Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
