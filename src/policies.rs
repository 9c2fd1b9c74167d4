//! Appointment and schedule rules.
//!
//! These checks are pure: callers load the rows inside their transaction
//! and pass them in together with the current time.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::constants::CANCELLATION_LEAD_HOURS;
use crate::entities::{cita, EstadoCita, Rol};

/// Reasons a cita cannot be cancelled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancellationError {
    #[error("No tienes permiso para cancelar esta cita")]
    Forbidden,
    #[error("La cita ya está cancelada")]
    AlreadyCancelled,
    #[error("No se puede cancelar una cita ya completada")]
    AlreadyCompleted,
    #[error("No se puede cancelar con menos de 24 horas de anticipación")]
    TooLate,
}

/// Scheduling constraints on citas and horarios.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("La fecha de la cita debe ser futura")]
    NotInFuture,
    #[error("La hora de fin debe ser posterior a la hora de inicio")]
    InvalidTimeRange,
}

/// Decide whether `actor` may cancel `cita` at `now`.
///
/// Checks run in a fixed order: ownership, current state, then lead time.
pub fn check_cancellation(
    cita: &cita::Model,
    actor_id: i32,
    actor_rol: Rol,
    now: DateTime<Utc>,
) -> Result<(), CancellationError> {
    if cita.paciente_id != actor_id && actor_rol != Rol::Administrador {
        return Err(CancellationError::Forbidden);
    }

    match cita.estado {
        EstadoCita::Cancelada => return Err(CancellationError::AlreadyCancelled),
        EstadoCita::Completada => return Err(CancellationError::AlreadyCompleted),
        EstadoCita::Programada => {}
    }

    if cita.fecha_cita - now < Duration::hours(CANCELLATION_LEAD_HOURS) {
        return Err(CancellationError::TooLate);
    }

    Ok(())
}

/// A cita can only be booked or moved to a moment after `now`.
pub fn ensure_future(fecha: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), ScheduleError> {
    if fecha <= now {
        return Err(ScheduleError::NotInFuture);
    }
    Ok(())
}

/// A horario must end strictly after it starts.
pub fn ensure_time_range(inicio: NaiveTime, fin: NaiveTime) -> Result<(), ScheduleError> {
    if fin <= inicio {
        return Err(ScheduleError::InvalidTimeRange);
    }
    Ok(())
}
