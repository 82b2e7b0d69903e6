//! Image record queries.
//!
//! The two record operations of the storage engine: insert one record inside
//! a write transaction, and list every record inside a read transaction.
//! `insert_image` resolves only after the transaction has committed, so a
//! caller that lists immediately afterwards is guaranteed to see the new
//! record.

use chrono::{DateTime, Utc};
use picvault_common::{Error, ImageId, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, TransactionBehavior};

use crate::models::{ImageRecord, NewImage};

/// Parse an image record from a database row.
///
/// Expects columns in order: id, blob, title, description, timestamp.
fn parse_image_row(row: &rusqlite::Row) -> rusqlite::Result<ImageRecord> {
    let timestamp = DateTime::parse_from_rfc3339(&row.get::<_, String>(4)?)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(ImageRecord {
        id: ImageId::from(row.get::<_, i64>(0)?),
        blob: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        timestamp,
    })
}

/// Insert a new image record.
///
/// The write runs inside an immediate transaction and this function returns
/// only once `COMMIT` has succeeded (commit-before-resolve). On abort the
/// transaction rolls back and the table is unchanged.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `image` - Record to insert; the id is assigned by the engine
///
/// # Returns
///
/// * `Ok(ImageId)` - The id assigned to the inserted record
/// * `Err(Error::WriteFailed)` - If the transaction aborted
pub fn insert_image(conn: &mut Connection, image: &NewImage) -> Result<ImageId> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| Error::write_failed(e.to_string()))?;

    tx.execute(
        "INSERT INTO images (blob, title, description, timestamp)
         VALUES (:blob, :title, :description, :timestamp)",
        rusqlite::named_params! {
            ":blob": &image.blob,
            ":title": &image.title,
            ":description": &image.description,
            ":timestamp": image.timestamp.to_rfc3339(),
        },
    )
    .map_err(|e| Error::write_failed(e.to_string()))?;

    let id = ImageId::from(tx.last_insert_rowid());

    // Durability point: the id is only handed out after the commit.
    tx.commit().map_err(|e| Error::write_failed(e.to_string()))?;

    Ok(id)
}

/// List every image record, oldest first.
///
/// Runs inside a read-only (deferred) transaction with no filtering or
/// limit. Key order is explicit: rows come back `ORDER BY id ASC`, i.e.
/// insertion order.
///
/// # Arguments
///
/// * `conn` - Database connection
///
/// # Returns
///
/// * `Ok(Vec<ImageRecord>)` - All records, possibly empty
/// * `Err(Error::ReadFailed)` - If the transaction aborted
pub fn list_images(conn: &mut Connection) -> Result<Vec<ImageRecord>> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Deferred)
        .map_err(|e| Error::read_failed(e.to_string()))?;

    let images = {
        let mut stmt = tx
            .prepare(
                "SELECT id, blob, title, description, timestamp
                 FROM images
                 ORDER BY id ASC",
            )
            .map_err(|e| Error::read_failed(e.to_string()))?;

        let rows = stmt
            .query_map([], parse_image_row)
            .map_err(|e| Error::read_failed(e.to_string()))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::read_failed(e.to_string()))?;
        rows
    };

    tx.commit().map_err(|e| Error::read_failed(e.to_string()))?;

    Ok(images)
}
