//! Common types shared across picvault crates.
//!
//! This crate provides the error taxonomy used by the storage engine and the
//! repository facade, plus the typed record identifier.

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::ImageId;
