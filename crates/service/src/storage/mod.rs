//! Storage abstractions for service layer
//!
//! File-backed stores that persist whole documents as JSON. Writes go to a
//! temp file in the same directory and are renamed over the target.

pub mod atomic;
pub mod collection;
pub mod json_file_store;
pub mod json_map_store;

pub use collection::CollectionStore;
pub use json_file_store::JsonFileStore;
pub use json_map_store::JsonMapStore;
