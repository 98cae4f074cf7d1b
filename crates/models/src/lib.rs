//! Content records served by the portal.
//!
//! Every persisted category is either a collection of records keyed by `id`
//! or a singleton document. Records serialize in camelCase and keep unknown
//! fields in a flattened `extra` map so older admin payloads survive a
//! wholesale rewrite untouched.

pub mod catalog;
pub mod category;
pub mod defaults;
pub mod errors;
pub mod knowledge;
pub mod landing;
pub mod mail;
pub mod pathfinder;
pub mod record;

pub use catalog::{ProcessStep, ServiceOffering, Workshop};
pub use category::{Category, CategoryKind};
pub use errors::ModelError;
pub use knowledge::{BestPractice, KnowledgeItem, Resource};
pub use landing::{Hero, LandingPage, LandingSection};
pub use mail::{MailAuth, MailConfig};
pub use pathfinder::PathfinderUnit;
pub use record::{ContentRecord, Document};
