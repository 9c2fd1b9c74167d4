//! cmedicas - A backend service for medical appointments
//!
//! This library provides a role-gated HTTP API for managing patients,
//! physicians, their weekly schedules and appointments. It includes
//! password and token authentication, relational storage through SeaORM,
//! and the cancellation rules that govern appointments.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection and schema creation
//! * [`repositories`] - Queries and writes per entity
//! * [`auth`] - Password hashing and access tokens
//! * [`policies`] - Appointment cancellation and scheduling rules
//! * [`api`] - HTTP routing, middleware and handlers
//! * [`utils`] - Utility functions and helpers

/// HTTP API built on axum
pub mod api;

/// Password hashing and signed access tokens
pub mod auth;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and user-facing messages
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup
pub mod logger;

/// Appointment and schedule rules
pub mod policies;

/// Repository layer for database operations
pub mod repositories;

/// Database connection and schema management
pub mod storage;

/// Utility functions for date/time handling and other helpers
pub mod utils;

// Re-export entity models for convenient access
pub use entities::{cita, horario, medico, notificacion, observacion, persona, usuario};
