//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Every method is generic over `ConnectionTrait`, so the same call works on
//! the connection pool or inside a transaction.

pub mod cita;
pub mod horario;
pub mod medico;
pub mod notificacion;
pub mod observacion;
pub mod persona;
pub mod usuario;

pub use cita::{CitaFilter, CitaRepository};
pub use horario::HorarioRepository;
pub use medico::MedicoRepository;
pub use notificacion::NotificacionRepository;
pub use observacion::ObservacionRepository;
pub use persona::PersonaRepository;
pub use usuario::UsuarioRepository;
