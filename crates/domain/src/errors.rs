//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Forecast horizon must be at least one day
    #[error("Invalid horizon: {0} days (must be at least 1)")]
    InvalidHorizon(u32),

    /// A series operation requires at least one observation
    #[error("Observation series is empty")]
    EmptySeries,

    /// Date parsing or arithmetic failed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
