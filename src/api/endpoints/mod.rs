pub mod auth;
pub mod citas;
pub mod health;
pub mod horarios;
pub mod medicos;
pub mod notificaciones;
pub mod observaciones;
pub mod personas;
pub mod usuarios;
