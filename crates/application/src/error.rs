//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Historical data could not be imported
    #[error("Data import error: {0}")]
    DataImport(String),

    /// Model fitting or prediction failed
    #[error("Model error: {0}")]
    Model(String),

    /// Persistence operation failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Chart artifact could not be rendered
    #[error("Chart rendering error: {0}")]
    Chart(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A forecast or input failed validation
    #[error("Validation failed: {0}")]
    Validation(String),
}
