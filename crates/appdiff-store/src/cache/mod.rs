//! Persisted hosting asset cache

mod sqlite_cache;

pub use sqlite_cache::SqliteAssetCache;
