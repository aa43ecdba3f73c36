//! Dependency facet comparison.

use crate::diff::model::{DiffEntry, Facet};
use crate::model::DependencySnapshot;

/// Path used for the single dependency entry
pub const DEPENDENCY_ARCHIVE_PATH: &str = "dependency-archive";

fn short(digest: &str) -> &str {
    &digest[..12.min(digest.len())]
}

/// Compare local and remote dependency archives.
///
/// Emits at most one entry. The remote digest is trusted as supplied.
pub fn diff_dependencies(local: &DependencySnapshot, remote: &DependencySnapshot) -> Vec<DiffEntry> {
    match (local.digest(), remote.digest()) {
        (None, None) => Vec::new(),
        (Some(l), None) => vec![DiffEntry::added(
            Facet::Dependency,
            DEPENDENCY_ARCHIVE_PATH,
            format!("digest {}", short(l)),
        )],
        (None, Some(r)) => vec![DiffEntry::removed(
            Facet::Dependency,
            DEPENDENCY_ARCHIVE_PATH,
            format!("digest {}", short(r)),
        )],
        (Some(l), Some(r)) if l == r => Vec::new(),
        (Some(l), Some(r)) => vec![DiffEntry::changed(
            Facet::Dependency,
            DEPENDENCY_ARCHIVE_PATH,
            format!("digest {} -> {}", short(r), short(l)),
        )],
    }
}
