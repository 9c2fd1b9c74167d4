//! Constants used throughout the application
//!
//! This module centralizes user-facing messages, field limits and other
//! constant values to improve maintainability and consistency.

// Configuration
pub const LOCAL_CONFIG_FILE: &str = "cmedicas.toml";
pub const CONFIG_DIR_NAME: &str = "cmedicas";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_GENERATED: &str = "✅ Default configuration written to";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cmedicas.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 8080;

// Authentication
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
pub const MAX_TOKEN_TTL_HOURS: u64 = 720;
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 100_000;
pub const MIN_PASSWORD_ITERATIONS: u32 = 1_000;
pub const JWT_SECRET_MIN_LEN: usize = 16;
pub const PASSWORD_MIN_LEN: usize = 8;

// Field limits
pub const NAME_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 15;
pub const EMAIL_MAX_LEN: usize = 100;
pub const SPECIALTY_MAX_LEN: usize = 100;
pub const MOTIVO_MAX_LEN: usize = 500;
pub const MENSAJE_MAX_LEN: usize = 500;

// Appointment rules
pub const CANCELLATION_LEAD_HOURS: i64 = 24;
pub const CANCELLATION_NOTICE: &str = "Su cita ha sido cancelada";

// Error Messages
pub const ERROR_TOKEN_REQUIRED: &str = "Se requiere token de autenticación";
pub const ERROR_TOKEN_INVALID: &str = "Token inválido";
pub const ERROR_ADMIN_ONLY: &str = "Acceso restringido a administradores";
pub const ERROR_INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub const ERROR_INVALID_ID: &str = "ID inválido";
pub const ERROR_EMAIL_TAKEN: &str = "El correo ya está registrado";
pub const ERROR_BIRTH_DATE_FORMAT: &str = "Formato de fecha inválido. Use dd/mm/aaaa";
pub const ERROR_FILTER_DATE_FORMAT: &str = "Formato de fecha inválido. Use YYYY-MM-DD";
pub const ERROR_FILTER_ESTADO: &str = "Estado inválido. Use programada, cancelada o completada";
pub const ERROR_PERSONA_NOT_FOUND: &str = "Persona no encontrada";
pub const ERROR_PERSONA_HAS_USUARIO: &str = "No se puede eliminar, la persona tiene un usuario asociado";
pub const ERROR_PERSONA_ALREADY_USUARIO: &str = "La persona ya tiene un usuario asociado";
pub const ERROR_USUARIO_NOT_FOUND: &str = "Usuario no encontrado";
pub const ERROR_USUARIO_HAS_RECORDS: &str = "No se puede eliminar, el usuario tiene registros asociados";
pub const ERROR_USUARIO_NOT_MEDICO: &str = "El usuario debe tener rol 'medico'";
pub const ERROR_USUARIO_ALREADY_MEDICO: &str = "El usuario ya está registrado como médico";
pub const ERROR_MEDICO_NOT_FOUND: &str = "Médico no encontrado";
pub const ERROR_MEDICO_FOR_USUARIO_NOT_FOUND: &str = "No se encontró médico asociado a este usuario";
pub const ERROR_MEDICO_HAS_HORARIOS: &str = "No se puede eliminar, el médico tiene horarios asignados";
pub const ERROR_MEDICO_HAS_CITAS: &str = "No se puede eliminar, el médico tiene citas programadas";
pub const ERROR_HORARIO_NOT_FOUND: &str = "Horario no encontrado";
pub const ERROR_PACIENTE_NOT_FOUND: &str = "Paciente no encontrado";
pub const ERROR_CITA_NOT_FOUND: &str = "Cita no encontrada";
pub const ERROR_CITA_FORBIDDEN: &str = "No tienes permiso para ver esta cita";
pub const ERROR_CITA_BOOK_FORBIDDEN: &str = "Solo puedes agendar citas a tu nombre";
pub const ERROR_CITA_HAS_NOTIFICACIONES: &str = "No se puede eliminar, la cita tiene notificaciones asociadas";
pub const ERROR_OBSERVACION_NOT_FOUND: &str = "Observación no encontrada";
pub const ERROR_OBSERVACION_FOR_CITA_NOT_FOUND: &str = "Observación no encontrada para esta cita";
pub const ERROR_OBSERVACION_EXISTS: &str = "La cita ya tiene una observación registrada";
pub const ERROR_OBSERVACION_REQUIRES_COMPLETED: &str = "Solo se pueden agregar observaciones a citas completadas";
pub const ERROR_NOTIFICACION_NOT_FOUND: &str = "Notificación no encontrada";

// Success Messages
pub const SUCCESS_REGISTRO: &str = "Registro exitoso";
pub const SUCCESS_CITA_CANCELADA: &str = "Cita cancelada exitosamente";
pub const SUCCESS_PERSONA_DELETED: &str = "Persona eliminada correctamente";
pub const SUCCESS_USUARIO_DELETED: &str = "Usuario eliminado correctamente";
pub const SUCCESS_MEDICO_DELETED: &str = "Médico eliminado correctamente";
pub const SUCCESS_HORARIO_DELETED: &str = "Horario eliminado correctamente";
pub const SUCCESS_CITA_DELETED: &str = "Cita eliminada correctamente";
pub const SUCCESS_OBSERVACION_DELETED: &str = "Observación eliminada correctamente";
pub const SUCCESS_NOTIFICACION_DELETED: &str = "Notificación eliminada correctamente";
