//! Field checks shared by request handlers.

use crate::api::error::ApiError;
use crate::constants::{EMAIL_MAX_LEN, PASSWORD_MIN_LEN};

/// Reject empty or whitespace-only values.
pub fn required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("El campo {field} es requerido")));
    }
    Ok(())
}

/// Reject values longer than `max` characters once trimmed, as stored.
pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.trim().chars().count() > max {
        return Err(ApiError::bad_request(format!(
            "El campo {field} no puede exceder {max} caracteres"
        )));
    }
    Ok(())
}

/// Required and bounded in one call.
pub fn required_max(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    required(field, value)?;
    max_len(field, value, max)
}

/// Optional value: only the length is checked when present.
pub fn optional_max(field: &str, value: Option<&str>, max: usize) -> Result<(), ApiError> {
    match value {
        Some(value) => max_len(field, value, max),
        None => Ok(()),
    }
}

/// Treat blank optional strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

pub fn email(value: &str) -> Result<(), ApiError> {
    required_max("correo", value, EMAIL_MAX_LEN)?;
    if !is_valid_email(value) {
        return Err(ApiError::bad_request("El correo no es válido"));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ApiError> {
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(ApiError::bad_request(format!(
            "La contraseña debe tener al menos {PASSWORD_MIN_LEN} caracteres"
        )));
    }
    Ok(())
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert!(required("nombre", "Ana").is_ok());
        assert!(required("nombre", "").is_err());
        assert!(required("nombre", "   ").is_err());
    }

    #[test]
    fn max_len_counts_characters_not_bytes() {
        assert!(max_len("nombre", "ñññ", 3).is_ok());
        assert!(max_len("nombre", "ññññ", 3).is_err());
    }

    #[test]
    fn max_len_ignores_surrounding_whitespace() {
        assert!(max_len("telefono", "  123456789012345 ", 15).is_ok());
        assert!(max_len("telefono", " 1234567890123456 ", 15).is_err());
    }

    #[test]
    fn optional_max_skips_missing() {
        assert!(optional_max("telefono", None, 15).is_ok());
        assert!(optional_max("telefono", Some("1234567890123456"), 15).is_err());
    }

    #[test]
    fn non_blank_drops_empty_strings() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" 555 ".into())), Some("555".into()));
    }

    #[test]
    fn email_shapes() {
        assert!(email("ana@clinica.mx").is_ok());
        assert!(email("ana.lopez+citas@correo.example.com").is_ok());
        assert!(email("").is_err());
        assert!(email("sin-arroba.mx").is_err());
        assert!(email("@clinica.mx").is_err());
        assert!(email("ana@clinica").is_err());
        assert!(email("ana@@clinica.mx").is_err());
        assert!(email("ana lopez@clinica.mx").is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(password("12345678").is_ok());
        assert!(password("1234567").is_err());
    }
}
