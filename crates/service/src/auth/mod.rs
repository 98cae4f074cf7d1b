//! Admin auth gate: one shared password, a signed session token with a fixed
//! lifetime, no per-user identity.

pub mod domain;
pub mod errors;
pub mod service;

pub use errors::AuthError;
pub use service::{AdminAuth, AuthConfig};

/// Cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_session";
