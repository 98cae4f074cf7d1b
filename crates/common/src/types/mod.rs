use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into() }
    }
}

/// Body returned by idempotent deletes: `removed` is false when the id was absent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub removed: bool,
}
