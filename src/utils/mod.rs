//! Utility modules for the cmedicas service.
//!
//! - [`datetime`] - Date and time parsing for the formats accepted by the API

pub mod datetime;
