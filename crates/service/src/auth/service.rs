use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader,
    Validation,
};
use tracing::{info, instrument, warn};

use super::domain::{AdminSession, LoginInput, SessionClaims};
use super::errors::AuthError;

const SUBJECT: &str = "admin";

/// Auth gate configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_password: String,
    pub session_secret: String,
    pub session_ttl: Duration,
}

/// Single-password admin authentication independent of web framework
pub struct AdminAuth {
    cfg: AuthConfig,
}

impl AdminAuth {
    pub fn new(cfg: AuthConfig) -> Self { Self { cfg } }

    pub fn session_ttl(&self) -> Duration { self.cfg.session_ttl }

    /// Check the password and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AdminAuth, AuthConfig, domain::LoginInput};
    /// let auth = AdminAuth::new(AuthConfig {
    ///     admin_password: "open sesame".into(),
    ///     session_secret: "secret".into(),
    ///     session_ttl: chrono::Duration::hours(24),
    /// });
    /// let session = auth.login(&LoginInput { password: "open sesame".into() }).unwrap();
    /// assert!(auth.verify(&session.token).is_ok());
    /// assert!(auth.login(&LoginInput { password: "open sesame ".into() }).is_err());
    /// ```
    #[instrument(skip(self, input))]
    pub fn login(&self, input: &LoginInput) -> Result<AdminSession, AuthError> {
        if self.cfg.admin_password.is_empty() {
            warn!("login attempted but no admin password is configured");
            return Err(AuthError::NotConfigured);
        }
        if !constant_time_eq(input.password.as_bytes(), self.cfg.admin_password.as_bytes()) {
            warn!("admin login rejected");
            return Err(AuthError::Unauthorized);
        }

        let now = Utc::now();
        let expires_at = now + self.cfg.session_ttl;
        let claims = SessionClaims { sub: SUBJECT.into(), iat: now.timestamp(), exp: expires_at.timestamp() };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.session_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(expires_at = %expires_at, "admin_login");
        Ok(AdminSession { token, expires_at })
    }

    /// Validate signature, expiry and subject of a session token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.session_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::TokenError(e.to_string()),
        })?;
        if data.claims.sub != SUBJECT {
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
