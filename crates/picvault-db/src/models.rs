//! Internal Rust models matching the database schema.

use chrono::{DateTime, Utc};
use picvault_common::ImageId;
use serde::{Deserialize, Serialize};

/// A persisted image record as read back from the `images` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    /// Surrogate key assigned by the engine on insert. Never reused.
    pub id: ImageId,
    /// Raw image bytes. Immutable once stored.
    #[serde(default, skip_serializing)]
    pub blob: Vec<u8>,
    /// Optional annotation; empty string when omitted at store time.
    pub title: String,
    /// Optional annotation; empty string when omitted at store time.
    pub description: String,
    /// Creation instant stamped by the repository at write time.
    pub timestamp: DateTime<Utc>,
}

/// A record to be inserted. The id is assigned by the engine.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub blob: Vec<u8>,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl NewImage {
    /// Build a new record stamped with the current time.
    pub fn new(blob: Vec<u8>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            blob,
            title: title.into(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}
