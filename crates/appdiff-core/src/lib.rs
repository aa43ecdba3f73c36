//! appdiff Core - pure application state diff kernel
//!
//! This crate provides the data model and comparison logic for diffing a
//! locally-authored application against its deployed state:
//! - Snapshot models: configuration trees, dependency archives, hosting assets
//! - Path normalisation and content digests
//! - Per-facet comparison algorithms (config, dependency, hosting)
//! - Report merging and rendering
//! - Collaborator seams: asset cache, content hasher, dependency preparer
//!
//! Nothing here performs I/O beyond hashing readers handed to it.

pub mod asset_cache;
pub mod dependency_preparer;
pub mod diff;
pub mod digest;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod path;

// Re-export commonly used types
pub use asset_cache::{AssetCache, AssetCacheEntry, FileSignature, NullAssetCache};
pub use dependency_preparer::{DependencyPreparer, PreparedArchive};
pub use diff::{ChangeKind, DiffEntry, DiffReport, Facet};
pub use digest::ContentHasher;
pub use errors::{ExError, ExErrorKind, Result, SnapshotError};
pub use model::{ConfigTree, DependencySnapshot, FileNode, HostingAsset};
