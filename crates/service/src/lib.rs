//! Service layer for the portal content.
//! - File-backed JSON stores, one file per content category.
//! - The content data-service: validation and category dispatch on top of the stores.
//! - Admin auth gate, assessment scorer and mail settings resolution.

pub mod assessment;
pub mod auth;
pub mod content;
pub mod errors;
pub mod mail;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;
