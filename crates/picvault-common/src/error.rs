//! Common error types used throughout picvault.
//!
//! The taxonomy mirrors the failure modes of the storage layer: the database
//! cannot be opened, a write transaction aborted, or a read transaction
//! aborted. The type is `Clone` so a failed open can be cached once and
//! re-surfaced by every later operation.

/// Common error type for picvault.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The durable-storage subsystem could not be opened or upgraded.
    ///
    /// Surfaced by the connection-open path and propagated to every
    /// dependent operation.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A write transaction aborted. Nothing was committed.
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A read transaction aborted.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// An I/O operation outside the database failed (e.g. reading the
    /// image file to be stored).
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Create a new StorageUnavailable error.
    pub fn storage_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a new WriteFailed error.
    pub fn write_failed<S: Into<String>>(msg: S) -> Self {
        Self::WriteFailed(msg.into())
    }

    /// Create a new ReadFailed error.
    pub fn read_failed<S: Into<String>>(msg: S) -> Self {
        Self::ReadFailed(msg.into())
    }

    /// Create a new Io error from a message.
    pub fn io<S: Into<String>>(msg: S) -> Self {
        Self::Io(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::storage_unavailable("permission denied");
        assert_eq!(err.to_string(), "Storage unavailable: permission denied");

        let err = Error::write_failed("quota exceeded");
        assert_eq!(err.to_string(), "Write failed: quota exceeded");

        let err = Error::read_failed("transaction aborted");
        assert_eq!(err.to_string(), "Read failed: transaction aborted");

        let err = Error::io("file vanished");
        assert_eq!(err.to_string(), "IO error: file vanished");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_clone_preserves_message() {
        let err = Error::storage_unavailable("disk full");
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_result_type() {
        fn test_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(test_fn().unwrap(), 42);

        fn error_fn() -> Result<i32> {
            Err(Error::write_failed("boom"))
        }
        assert!(error_fn().is_err());
    }
}
