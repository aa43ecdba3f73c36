//! Asset cache interface for hosting digests.
//!
//! Entries are keyed by (app id, asset path). An entry is only trusted while
//! the local file's [`FileSignature`] still matches the one recorded with it.

use crate::errors::{ExError, ExErrorKind};
use chrono::{DateTime, Utc};

/// Cheap proxy for file content: size plus modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileSignature {
    pub size: u64,
    /// Modification time in nanoseconds since the Unix epoch
    pub modified_ns: i64,
}

impl FileSignature {
    pub fn new(size: u64, modified_ns: i64) -> Self {
        Self { size, modified_ns }
    }
}

/// A persisted digest for one hosting asset of one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCacheEntry {
    pub app_id: String,
    pub path: String,
    pub digest: String,
    pub signature: FileSignature,
    pub last_seen: DateTime<Utc>,
}

impl AssetCacheEntry {
    /// Whether this entry may stand in for hashing a file with `current` signature
    pub fn is_valid_for(&self, current: &FileSignature) -> bool {
        self.signature == *current
    }
}

/// Persistent digest cache.
///
/// Implementations must tolerate concurrent calls; writes to one key may be
/// serialised with last-writer-wins.
#[allow(clippy::result_large_err)]
pub trait AssetCache: Send + Sync {
    /// Look up the entry for (app_id, path)
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Cache` when the store cannot be read.
    fn get(&self, app_id: &str, path: &str) -> Result<Option<AssetCacheEntry>, ExError>;

    /// Insert or replace the entry for (app_id, path)
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Cache` when the store cannot be written.
    fn put(
        &self,
        app_id: &str,
        path: &str,
        digest: &str,
        signature: FileSignature,
    ) -> Result<(), ExError>;
}

/// Always-miss cache used when no persistent store is available.
pub struct NullAssetCache;

impl AssetCache for NullAssetCache {
    fn get(&self, _: &str, _: &str) -> Result<Option<AssetCacheEntry>, ExError> {
        Ok(None)
    }

    fn put(&self, _: &str, _: &str, _: &str, _: FileSignature) -> Result<(), ExError> {
        Ok(())
    }
}

/// Build a cache error for `op`
pub fn cache_error(op: &str, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Cache)
        .with_op(op)
        .with_message(message)
}
