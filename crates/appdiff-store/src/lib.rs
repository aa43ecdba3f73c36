//! appdiff Store - local filesystem and persisted cache
//!
//! Provides:
//! - Local snapshot loading (configuration tree, hosting files and metadata)
//! - SQLite-backed hosting asset cache with embedded migrations
//! - Streaming SHA-256 file hashing
//! - Filesystem dependency archive preparation

pub mod cache;
pub mod db;
pub mod errors;
pub mod hasher;
pub mod local;
pub mod migrations;

// Re-export key types
pub use cache::SqliteAssetCache;
pub use errors::Result;
pub use hasher::Sha256FileHasher;
pub use local::FsDependencyPreparer;
