use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt data file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }

    /// True for errors caused by the caller's payload rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Validation(_) | ServiceError::Model(_) | ServiceError::NotFound(_))
    }
}
