//! Database connection and schema management
//!
//! This module owns the SeaORM connection pool and creates the tables for:
//! - Personas and Usuarios
//! - Medicos and their Horarios
//! - Citas, Notificaciones and Observaciones

pub mod db;

pub use db::Storage;
