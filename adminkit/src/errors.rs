use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid format: {0}")]
    ImportError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Simulation error: {0}")]
    SimulationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ValidationErrors> for AdminError {
    fn from(err: ValidationErrors) -> Self {
        AdminError::ValidationError(err)
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::ImportError(err.to_string())
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::StorageError(err.to_string())
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        AdminError::Unknown(err.to_string())
    }
}
