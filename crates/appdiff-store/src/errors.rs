//! Error handling for appdiff-store
//!
//! Wraps appdiff-core ExError with store-specific helpers

use appdiff_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a recoverable cache error from rusqlite::Error
pub fn cache_error(operation: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Cache)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create an IO error for a local path
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a failed directory walk
pub fn walk_error(operation: &str, err: walkdir::Error) -> ExError {
    let path = err
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a dependency build error
pub fn build_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Build)
        .with_op("prepare_dependency_archive")
        .with_message(reason)
}
