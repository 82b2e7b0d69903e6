//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2. It handles
//! pool initialization, per-connection setup, and running migrations. Opening
//! the same database path twice is safe: migrations already applied are
//! skipped, so the schema is created exactly once per database.

use std::path::Path;
use std::time::Duration;

use picvault_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a new database pool at the given file path.
///
/// This function will:
/// - Create the parent directory and database file if they don't exist
/// - Set up connection pooling with r2d2
/// - Enable WAL journaling and a lock-wait timeout on every connection
/// - Run pending database migrations
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(DbPool)` - Initialized connection pool
/// * `Err(Error::StorageUnavailable)` - If the host denies access or a
///   migration fails
///
/// # Example
///
/// ```no_run
/// use picvault_db::pool::init_pool;
///
/// let pool = init_pool("/var/lib/picvault/imagesDatabase.db".as_ref()).unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &Path) -> Result<DbPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::storage_unavailable(format!(
                    "Failed to create data directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        // journal_mode returns the resulting mode as a row
        conn.query_row("PRAGMA journal_mode=WAL", [], |_| Ok(()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    let pool = Pool::builder()
        .max_size(4)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .map_err(|e| Error::storage_unavailable(format!("Failed to create connection pool: {}", e)))?;

    run_migrations_on(&pool)?;

    tracing::debug!(path = %db_path.display(), "image database opened");

    Ok(pool)
}

/// Initialize an in-memory database pool for testing.
///
/// The database is lost when the pool is dropped.
///
/// # Example
///
/// ```
/// use picvault_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    // A pool of one: each :memory: connection would otherwise open its own
    // private database.
    let pool = Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .map_err(|e| Error::storage_unavailable(format!("Failed to create in-memory pool: {}", e)))?;

    run_migrations_on(&pool)?;

    Ok(pool)
}

fn run_migrations_on(pool: &DbPool) -> Result<()> {
    let conn = pool.get().map_err(|e| {
        Error::storage_unavailable(format!("Failed to get connection for migrations: {}", e))
    })?;

    migrations::run_migrations(&conn)
        .map_err(|e| Error::storage_unavailable(format!("Failed to run migrations: {}", e)))?;

    Ok(())
}

/// Get a connection from the pool.
///
/// This is a convenience wrapper around `pool.get()` that converts the
/// r2d2 error into our common Error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::storage_unavailable(format!("Failed to get connection from pool: {}", e)))
}
