use crate::digest::canonical_digest;
use crate::errors::SnapshotError;

/// Presence and content identity of a dependency archive.
///
/// The archive is an opaque blob; only whether it exists and its digest
/// matter for diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySnapshot {
    digest: Option<String>,
}

impl DependencySnapshot {
    /// No archive (never configured, or nothing to upload)
    pub fn absent() -> Self {
        Self { digest: None }
    }

    /// An archive with the given digest
    pub fn present(digest: &str) -> Result<Self, SnapshotError> {
        Ok(Self {
            digest: Some(canonical_digest("dependency archive", digest)?),
        })
    }

    /// Build from the wire-level `{present, digest}` pair
    pub fn from_parts(present: bool, digest: Option<&str>) -> Result<Self, SnapshotError> {
        match (present, digest) {
            (false, _) => Ok(Self::absent()),
            (true, Some(d)) => Self::present(d),
            (true, None) => Err(SnapshotError::PresentWithoutDigest),
        }
    }

    pub fn is_present(&self) -> bool {
        self.digest.is_some()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}
