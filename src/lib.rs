//! Picvault - local durable image vault
//!
//! This library crate exposes the repository facade and configuration for
//! integration testing and embedding.

pub mod config;
pub mod repository;
