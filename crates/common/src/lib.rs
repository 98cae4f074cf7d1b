//! Shared plumbing for the portal crates: logging setup, startup checks,
//! Prometheus metrics and the small HTTP payload types every surface returns.

pub mod env;
pub mod metrics;
pub mod types;
pub mod utils;
