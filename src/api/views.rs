//! Response shapes that embed related rows.

use anyhow::Result;
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::entities::{cita, horario, medico, notificacion, observacion, persona, usuario};
use crate::repositories::{
    CitaRepository, MedicoRepository, NotificacionRepository, PersonaRepository, UsuarioRepository,
};

/// Usuario with its persona. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioDetalle {
    #[serde(flatten)]
    pub usuario: usuario::Model,
    pub persona: Option<persona::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicoDetalle {
    #[serde(flatten)]
    pub medico: medico::Model,
    pub usuario: Option<UsuarioDetalle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitaDetalle {
    #[serde(flatten)]
    pub cita: cita::Model,
    pub paciente: Option<UsuarioDetalle>,
    pub medico: Option<MedicoDetalle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notificaciones: Option<Vec<notificacion::Model>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HorarioDetalle {
    #[serde(flatten)]
    pub horario: horario::Model,
    pub medico: Option<MedicoDetalle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObservacionDetalle {
    #[serde(flatten)]
    pub observacion: observacion::Model,
    pub cita: Option<cita::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificacionDetalle {
    #[serde(flatten)]
    pub notificacion: notificacion::Model,
    pub usuario: Option<UsuarioDetalle>,
    pub cita: Option<cita::Model>,
}

/// Trimmed medico listing used by the availability search.
#[derive(Debug, Clone, Serialize)]
pub struct MedicoDisponible {
    pub id: i32,
    pub nombre: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub especialidad: String,
}

pub async fn usuario_detalle<C>(conn: &C, usuario: usuario::Model) -> Result<UsuarioDetalle>
where
    C: ConnectionTrait,
{
    let persona = PersonaRepository::get_by_id(conn, usuario.persona_id).await?;
    Ok(UsuarioDetalle { usuario, persona })
}

pub async fn usuario_detalle_by_id<C>(conn: &C, id: i32) -> Result<Option<UsuarioDetalle>>
where
    C: ConnectionTrait,
{
    Ok(UsuarioRepository::get_with_persona(conn, id)
        .await?
        .map(|(usuario, persona)| UsuarioDetalle { usuario, persona }))
}

pub async fn medico_detalle<C>(conn: &C, medico: medico::Model) -> Result<MedicoDetalle>
where
    C: ConnectionTrait,
{
    let usuario = usuario_detalle_by_id(conn, medico.usuario_id).await?;
    Ok(MedicoDetalle { medico, usuario })
}

pub async fn medico_detalle_by_id<C>(conn: &C, id: i32) -> Result<Option<MedicoDetalle>>
where
    C: ConnectionTrait,
{
    match MedicoRepository::get_by_id(conn, id).await? {
        Some(medico) => Ok(Some(medico_detalle(conn, medico).await?)),
        None => Ok(None),
    }
}

pub async fn medicos_detalle<C>(conn: &C, medicos: Vec<medico::Model>) -> Result<Vec<MedicoDetalle>>
where
    C: ConnectionTrait,
{
    let mut out = Vec::with_capacity(medicos.len());
    for medico in medicos {
        out.push(medico_detalle(conn, medico).await?);
    }
    Ok(out)
}

pub async fn medico_disponible<C>(conn: &C, medico: medico::Model) -> Result<MedicoDisponible>
where
    C: ConnectionTrait,
{
    let persona = match UsuarioRepository::get_with_persona(conn, medico.usuario_id).await? {
        Some((_, persona)) => persona,
        None => None,
    };
    let (nombre, apellido_paterno, apellido_materno) = persona
        .map(|p| (p.nombre, p.apellido_paterno, p.apellido_materno))
        .unwrap_or_default();

    Ok(MedicoDisponible {
        id: medico.id,
        nombre,
        apellido_paterno,
        apellido_materno,
        especialidad: medico.especialidad,
    })
}

/// Embed paciente and medico, plus notificaciones when `with_notificaciones` is set.
pub async fn cita_detalle<C>(conn: &C, cita: cita::Model, with_notificaciones: bool) -> Result<CitaDetalle>
where
    C: ConnectionTrait,
{
    let paciente = usuario_detalle_by_id(conn, cita.paciente_id).await?;
    let medico = medico_detalle_by_id(conn, cita.medico_id).await?;
    let notificaciones = if with_notificaciones {
        Some(NotificacionRepository::get_for_cita(conn, cita.id).await?)
    } else {
        None
    };

    Ok(CitaDetalle {
        cita,
        paciente,
        medico,
        notificaciones,
    })
}

pub async fn citas_detalle<C>(conn: &C, citas: Vec<cita::Model>) -> Result<Vec<CitaDetalle>>
where
    C: ConnectionTrait,
{
    let mut out = Vec::with_capacity(citas.len());
    for cita in citas {
        out.push(cita_detalle(conn, cita, false).await?);
    }
    Ok(out)
}

pub async fn horario_detalle<C>(conn: &C, horario: horario::Model) -> Result<HorarioDetalle>
where
    C: ConnectionTrait,
{
    let medico = medico_detalle_by_id(conn, horario.medico_id).await?;
    Ok(HorarioDetalle { horario, medico })
}

pub async fn observacion_detalle<C>(conn: &C, observacion: observacion::Model) -> Result<ObservacionDetalle>
where
    C: ConnectionTrait,
{
    let cita = CitaRepository::get_by_id(conn, observacion.cita_id).await?;
    Ok(ObservacionDetalle { observacion, cita })
}

pub async fn notificacion_detalle<C>(conn: &C, notificacion: notificacion::Model) -> Result<NotificacionDetalle>
where
    C: ConnectionTrait,
{
    let usuario = usuario_detalle_by_id(conn, notificacion.usuario_id).await?;
    let cita = CitaRepository::get_by_id(conn, notificacion.cita_id).await?;
    Ok(NotificacionDetalle {
        notificacion,
        usuario,
        cita,
    })
}

pub async fn notificaciones_detalle<C>(
    conn: &C,
    notificaciones: Vec<notificacion::Model>,
) -> Result<Vec<NotificacionDetalle>>
where
    C: ConnectionTrait,
{
    let mut out = Vec::with_capacity(notificaciones.len());
    for notificacion in notificaciones {
        out.push(notificacion_detalle(conn, notificacion).await?);
    }
    Ok(out)
}
