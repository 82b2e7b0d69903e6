//! The image repository facade.
//!
//! Wraps the storage engine behind two async operations, `store_image` and
//! `fetch_images`, hiding the connection lifecycle and transaction
//! sequencing. The database is opened lazily on first use and the outcome is
//! cached for the process lifetime: a successful open is shared by every
//! later operation, a failed open is terminal and re-surfaced as-is instead
//! of retrying.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use picvault_common::{Error, ImageId, Result};
use picvault_db::models::NewImage;
use picvault_db::pool::{self, DbPool};
use picvault_db::queries::images;
use tokio::sync::OnceCell;

use super::handle::{DisplayImage, ObjectUrl, ObjectUrlRegistry};

/// Repository over one local image database.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct ImageRepository {
    db_path: PathBuf,
    registry: Arc<ObjectUrlRegistry>,
    // Lifecycle cell: unset = uninitialized, Ok = ready, Err = failed
    // terminally with the original open error.
    pool: OnceCell<std::result::Result<DbPool, Error>>,
}

impl ImageRepository {
    /// Create a repository for the database at `db_path`.
    ///
    /// No I/O happens here; the database is opened on first use.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            registry: Arc::new(ObjectUrlRegistry::new()),
            pool: OnceCell::new(),
        }
    }

    /// Open the database once and reuse the outcome.
    ///
    /// Concurrent first calls are serialized by the cell, so the schema is
    /// created exactly once no matter how many operations race on a fresh
    /// store.
    async fn pool(&self) -> Result<DbPool> {
        let outcome = self
            .pool
            .get_or_init(|| async {
                let path = self.db_path.clone();
                tracing::info!(path = %path.display(), "opening image database");
                match tokio::task::spawn_blocking(move || pool::init_pool(&path)).await {
                    Ok(result) => result,
                    Err(e) => Err(Error::storage_unavailable(format!(
                        "open task failed: {}",
                        e
                    ))),
                }
            })
            .await;

        match outcome {
            Ok(pool) => Ok(pool.clone()),
            Err(e) => {
                tracing::warn!("image database previously failed to open: {}", e);
                Err(e.clone())
            }
        }
    }

    /// Store one image with optional annotations.
    ///
    /// The record is stamped with the current time and written inside a
    /// transaction that commits before this future resolves, so a fetch
    /// issued afterwards always observes the new record. Omitted annotations
    /// are stored as empty strings.
    ///
    /// # Returns
    ///
    /// The id assigned by the storage engine.
    pub async fn store_image(
        &self,
        blob: Vec<u8>,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<ImageId> {
        let pool = self.pool().await?;
        let image = NewImage::new(
            blob,
            title.unwrap_or_default(),
            description.unwrap_or_default(),
        );

        let id = tokio::task::spawn_blocking(move || {
            let mut conn = pool::get_conn(&pool)?;
            images::insert_image(&mut conn, &image)
        })
        .await
        .map_err(|e| Error::write_failed(format!("store task failed: {}", e)))??;

        tracing::debug!(%id, "stored image record");
        Ok(id)
    }

    /// Read a file's full contents and store it as an image.
    pub async fn store_image_file(
        &self,
        path: &Path,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<ImageId> {
        let blob = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}: {}", path.display(), e)))?;
        self.store_image(blob, title, description).await
    }

    /// Fetch every stored image, newest first.
    ///
    /// Each record's blob is wrapped in a fresh object URL registered with
    /// this repository's registry; the caller owns the returned handles and
    /// must revoke them once they are no longer displayed. An empty store
    /// yields an empty vec, not an error.
    pub async fn fetch_images(&self) -> Result<Vec<DisplayImage>> {
        let pool = self.pool().await?;

        let records = tokio::task::spawn_blocking(move || {
            let mut conn = pool::get_conn(&pool)?;
            images::list_images(&mut conn)
        })
        .await
        .map_err(|e| Error::read_failed(format!("fetch task failed: {}", e)))??;

        tracing::debug!(count = records.len(), "fetched image records");

        // The engine lists in key order (oldest first); newest-first is the
        // reverse.
        Ok(records
            .into_iter()
            .rev()
            .map(|record| DisplayImage {
                url: self.registry.create(Bytes::from(record.blob)),
                title: record.title,
                description: record.description,
            })
            .collect())
    }

    /// Dereference a display handle produced by this repository.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Bytes> {
        self.registry.resolve(url)
    }

    /// Release a display handle produced by this repository.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        self.registry.revoke(url)
    }

    /// The registry backing this repository's display handles.
    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for ImageRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRepository")
            .field("db_path", &self.db_path)
            .field("live_handles", &self.registry.len())
            .finish()
    }
}
