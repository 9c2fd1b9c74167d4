//! Persona entity: biographical record of a natural person.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Genero {
    #[sea_orm(string_value = "masculino")]
    #[serde(rename = "masculino")]
    Masculino,
    #[sea_orm(string_value = "femenino")]
    #[serde(rename = "femenino")]
    Femenino,
    #[sea_orm(string_value = "otro")]
    #[serde(rename = "otro")]
    Otro,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub nombre: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub apellido_paterno: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub apellido_materno: String,
    #[sea_orm(column_type = "String(StringLen::N(15))", nullable)]
    pub telefono: Option<String>,
    pub fecha_nacimiento: Option<Date>,
    pub genero: Genero,
    #[sea_orm(column_type = "Text", nullable)]
    pub direccion: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// First name followed by the paternal surname.
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido_paterno)
    }
}

impl ActiveModelBehavior for ActiveModel {}
