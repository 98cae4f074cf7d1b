//! Content fallback loader.
//!
//! Reads a category from an ordered chain of sources (remote API, local file
//! cache, local key-value map, built-in defaults) and mirrors writes to the
//! remote and both local caches.

pub mod errors;
pub mod loader;
pub mod sources;

pub use errors::{LoadError, SourceError};
pub use loader::{ContentLoader, LoadOutcome, Tier, WriteReport};
pub use sources::{CacheSource, ContentSource, DefaultSource, KeyValueSource, RemoteSource};
