//! Image repository module.
//!
//! The only interface the presentation layer depends on: store an image with
//! optional annotations, fetch all stored images newest-first as transient
//! display handles. Connection lifecycle, schema versioning, and transaction
//! sequencing are hidden behind the two operations.

mod handle;
mod service;

pub use handle::{DisplayImage, ObjectUrl, ObjectUrlRegistry};
pub use service::ImageRepository;
