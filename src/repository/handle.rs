//! Transient, revocable display handles for stored blobs.
//!
//! A fetched image is exposed as an object URL: a process-local reference
//! that can be dereferenced to the raw bytes without copying them into a
//! text encoding. Handles are registered in a process-local table and live
//! until explicitly revoked; whichever render produced a handle owns it and
//! must revoke it when it is superseded, so repeated fetches do not grow
//! the table without bound.

use bytes::Bytes;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// URL scheme prefix for picvault object URLs.
const URL_SCHEME: &str = "picvault://blob/";

/// A transient handle referencing a blob in the [`ObjectUrlRegistry`].
///
/// Valid only within the current process and only until revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectUrl(Uuid);

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", URL_SCHEME, self.0)
    }
}

impl Serialize for ObjectUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An image ready for display: a revocable handle to the bytes plus the
/// annotations copied verbatim from the stored record.
///
/// Instances are created fresh on every fetch and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayImage {
    pub url: ObjectUrl,
    pub title: String,
    pub description: String,
}

/// Process-local table mapping object URLs to blob bytes.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    blobs: DashMap<Uuid, Bytes>,
}

impl ObjectUrlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blob and hand out a fresh handle for it.
    pub fn create(&self, data: Bytes) -> ObjectUrl {
        let id = Uuid::new_v4();
        self.blobs.insert(id, data);
        ObjectUrl(id)
    }

    /// Dereference a handle. Returns `None` once the handle is revoked.
    ///
    /// `Bytes` is cheaply cloneable, so this does not copy the blob.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Bytes> {
        self.blobs.get(&url.0).map(|entry| entry.value().clone())
    }

    /// Release a handle and its blob. Returns `false` if it was already
    /// revoked.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        self.blobs.remove(&url.0).is_some()
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether no handles are live.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(Bytes::from_static(b"jpeg bytes"));

        let data = registry.resolve(&url).unwrap();
        assert_eq!(&data[..], b"jpeg bytes");
    }

    #[test]
    fn test_revoke_releases_blob() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(Bytes::from_static(b"x"));

        assert!(registry.revoke(&url));
        assert!(registry.resolve(&url).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_revoke_twice_is_false() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(Bytes::from_static(b"x"));

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
    }

    #[test]
    fn test_handles_are_distinct_per_create() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create(Bytes::from_static(b"same"));
        let b = registry.create(Bytes::from_static(b"same"));

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_url_display_format() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(Bytes::new());

        let rendered = url.to_string();
        assert!(rendered.starts_with("picvault://blob/"));
    }

    #[test]
    fn test_url_serializes_as_string() {
        let registry = ObjectUrlRegistry::new();
        let url = registry.create(Bytes::new());

        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, format!("\"{}\"", url));
    }
}
