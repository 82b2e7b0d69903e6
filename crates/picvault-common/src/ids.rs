//! Typed ID wrapper for stored image records.
//!
//! Record ids are surrogate keys assigned by the storage engine on insert:
//! monotonically increasing integers that are never reused or mutated.

use serde::{Deserialize, Serialize};

/// Unique identifier for a persisted image record.
///
/// Assigned by the storage engine's auto-increment key on first insert;
/// there is no constructor for fresh ids on the Rust side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(i64);

impl ImageId {
    /// The raw integer key as stored in the database.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ImageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ImageId> for i64 {
    fn from(id: ImageId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
