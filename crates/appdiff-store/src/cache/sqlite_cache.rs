//! SQLite-backed asset cache
//!
//! One row per (app_id, path). The connection sits behind a mutex so the
//! parallel hashing workers serialise their reads and writes; the last
//! writer on a key wins.

use crate::db;
use crate::errors::{cache_error, from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use appdiff_core::{AssetCache, AssetCacheEntry, ExError, ExErrorKind, FileSignature};
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub struct SqliteAssetCache {
    conn: Mutex<Connection>,
}

impl SqliteAssetCache {
    /// Open (or create) the cache database at `path` and bring its schema up
    /// to date. Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| io_error("open_asset_cache", parent, e))?;
        }

        let mut conn = db::open(path).map_err(|e| e.with_path(path.display().to_string()))?;
        db::configure(&conn)?;
        apply_migrations(&mut conn).map_err(|e| {
            ExError::new(ExErrorKind::Persistence)
                .with_op("open_asset_cache")
                .with_path(path.display().to_string())
                .with_message("asset cache schema could not be brought up to date")
                .with_source(e)
        })?;

        tracing::debug!(cache_path = %path.display(), "asset cache opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory cache
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Drop the entry for one asset. Returns whether an entry existed.
    pub fn invalidate(&self, app_id: &str, path: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let removed = conn
            .execute(
                "DELETE FROM hosting_asset_cache WHERE app_id = ?1 AND path = ?2",
                params![app_id, path],
            )
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Drop every entry recorded for `app_id`. Returns the number removed.
    pub fn invalidate_app(&self, app_id: &str) -> Result<usize> {
        let conn = self.conn.lock();
        conn.execute(
            "DELETE FROM hosting_asset_cache WHERE app_id = ?1",
            params![app_id],
        )
        .map_err(from_rusqlite)
    }

    /// Number of entries recorded for `app_id`
    pub fn entry_count(&self, app_id: &str) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM hosting_asset_cache WHERE app_id = ?1",
                params![app_id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl AssetCache for SqliteAssetCache {
    fn get(&self, app_id: &str, path: &str) -> std::result::Result<Option<AssetCacheEntry>, ExError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT digest, size, modified_ns, last_seen
                 FROM hosting_asset_cache WHERE app_id = ?1 AND path = ?2",
                params![app_id, path],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| cache_error("asset_cache_get", e))?;

        let Some((digest, size, modified_ns, last_seen_ms)) = row else {
            return Ok(None);
        };

        // A row that cannot be decoded is treated as a miss and rewritten later.
        let Ok(size) = u64::try_from(size) else {
            return Ok(None);
        };
        let Some(last_seen) = Utc.timestamp_millis_opt(last_seen_ms).single() else {
            return Ok(None);
        };

        Ok(Some(AssetCacheEntry {
            app_id: app_id.to_string(),
            path: path.to_string(),
            digest,
            signature: FileSignature::new(size, modified_ns),
            last_seen,
        }))
    }

    fn put(
        &self,
        app_id: &str,
        path: &str,
        digest: &str,
        signature: FileSignature,
    ) -> std::result::Result<(), ExError> {
        let size = i64::try_from(signature.size).unwrap_or(i64::MAX);
        let now = Utc::now().timestamp_millis();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO hosting_asset_cache (app_id, path, digest, size, modified_ns, last_seen)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(app_id, path) DO UPDATE SET
                digest = excluded.digest,
                size = excluded.size,
                modified_ns = excluded.modified_ns,
                last_seen = excluded.last_seen",
            params![app_id, path, digest, size, signature.modified_ns, now],
        )
        .map_err(|e| cache_error("asset_cache_put", e))?;
        Ok(())
    }
}
