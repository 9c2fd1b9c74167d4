pub mod cita;
pub mod horario;
pub mod medico;
pub mod notificacion;
pub mod observacion;
pub mod persona;
pub mod usuario;

pub use cita::Entity as Cita;
pub use horario::Entity as Horario;
pub use medico::Entity as Medico;
pub use notificacion::Entity as Notificacion;
pub use observacion::Entity as Observacion;
pub use persona::Entity as Persona;
pub use usuario::Entity as Usuario;

pub use cita::EstadoCita;
pub use horario::DiaSemana;
pub use notificacion::TipoNotificacion;
pub use persona::Genero;
pub use usuario::Rol;
