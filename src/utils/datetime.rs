//! Date and time utility functions
//!
//! This module provides parsing helpers for the date and time formats accepted
//! by the HTTP API, plus the serde adapters used by request bodies.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

use crate::entities::DiaSemana;

/// ISO calendar date, used by query filters (`?fecha=2025-01-31`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first date, used by the registration form (`31/01/1990`)
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str.trim(), ISO_DATE_FORMAT)
}

/// Parse a date string in dd/mm/yyyy format to NaiveDate
pub fn parse_birth_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str.trim(), BIRTH_DATE_FORMAT)
}

/// Parse a wall-clock time given as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(time_str: &str) -> Result<NaiveTime, chrono::ParseError> {
    let time_str = time_str.trim();
    NaiveTime::parse_from_str(time_str, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M"))
}

/// Weekday of a calendar date, as stored in horarios.
pub fn dia_semana(date: NaiveDate) -> DiaSemana {
    use chrono::Datelike;
    DiaSemana::from(date.weekday())
}

/// Serde adapter for required `HH:MM[:SS]` fields.
pub fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).map_err(|_| serde::de::Error::custom(format!("hora inválida '{raw}', use HH:MM")))
}

/// Serde adapter for optional `HH:MM[:SS]` fields.
pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_time(&raw)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("hora inválida '{raw}', use HH:MM"))),
        None => Ok(None),
    }
}
