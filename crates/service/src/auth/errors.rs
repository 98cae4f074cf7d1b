use thiserror::Error;

/// Errors of the admin login and session checks
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    Unauthorized,
    #[error("admin login is not configured")]
    NotConfigured,
    #[error("session expired")]
    Expired,
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Unauthorized => 1004,
            AuthError::NotConfigured => 1005,
            AuthError::Expired => 1006,
            AuthError::TokenError(_) => 1102,
        }
    }
}
