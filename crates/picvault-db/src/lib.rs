//! Picvault-DB: the storage engine adapter.
//!
//! This crate owns the lifecycle of one named, versioned SQLite database
//! (`imagesDatabase.db`) holding a single `images` table keyed by an
//! auto-incrementing surrogate id. It uses rusqlite with r2d2 connection
//! pooling and embedded schema migrations.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching the database schema
//! - `queries` - Record operations (insert, list-all)
//!
//! # Example
//!
//! ```
//! use picvault_db::models::NewImage;
//! use picvault_db::pool::{get_conn, init_memory_pool};
//! use picvault_db::queries::images;
//!
//! let pool = init_memory_pool().unwrap();
//! let mut conn = get_conn(&pool).unwrap();
//!
//! let id = images::insert_image(&mut conn, &NewImage::new(vec![1, 2, 3], "", "")).unwrap();
//! let all = images::list_images(&mut conn).unwrap();
//! assert_eq!(all[0].id, id);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;

/// File name of the image database within the data directory.
pub const DATABASE_FILE_NAME: &str = "imagesDatabase.db";
