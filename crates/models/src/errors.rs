use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl ModelError {
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}
