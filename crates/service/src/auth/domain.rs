use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub password: String,
}

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issued on a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
