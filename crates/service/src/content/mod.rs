//! Content data-service: category dispatch, validation and the JSON boundary
//! used by the HTTP layer.

pub mod service;

pub use service::ContentService;
