use models::Category;
use service::errors::ServiceError;
use thiserror::Error;

use crate::loader::Tier;

/// Failure of a single tier. Never fatal for the loader.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { status: u16, url: String },
    #[error("storage: {0}")]
    Storage(#[from] ServiceError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} source is read-only")]
    ReadOnly(Tier),
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Every tier failed or came back empty.
    #[error("no source returned data for {0}")]
    Exhausted(Category),
    #[error("failed to build source: {0}")]
    Setup(#[from] SourceError),
}
