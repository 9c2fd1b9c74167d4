//! Horario entity: a recurring weekly availability window of a medico.

use chrono::Weekday;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum DiaSemana {
    #[sea_orm(string_value = "Lunes")]
    Lunes,
    #[sea_orm(string_value = "Martes")]
    Martes,
    #[sea_orm(string_value = "Miércoles")]
    #[serde(rename = "Miércoles")]
    Miercoles,
    #[sea_orm(string_value = "Jueves")]
    Jueves,
    #[sea_orm(string_value = "Viernes")]
    Viernes,
    #[sea_orm(string_value = "Sábado")]
    #[serde(rename = "Sábado")]
    Sabado,
    #[sea_orm(string_value = "Domingo")]
    Domingo,
}

impl From<Weekday> for DiaSemana {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DiaSemana::Lunes,
            Weekday::Tue => DiaSemana::Martes,
            Weekday::Wed => DiaSemana::Miercoles,
            Weekday::Thu => DiaSemana::Jueves,
            Weekday::Fri => DiaSemana::Viernes,
            Weekday::Sat => DiaSemana::Sabado,
            Weekday::Sun => DiaSemana::Domingo,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "horarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub medico_id: i32,
    pub dia_semana: DiaSemana,
    pub hora_inicio: Time,
    pub hora_fin: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::medico::Entity",
        from = "Column::MedicoId",
        to = "super::medico::Column::Id",
        on_update = "Cascade"
    )]
    Medico,
}

impl Related<super::medico::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medico.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
