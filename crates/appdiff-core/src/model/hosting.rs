use crate::digest::canonical_digest;
use crate::errors::SnapshotError;
use crate::path::normalize_path;
use std::collections::BTreeMap;

/// Hosting attributes keyed by lower-cased header name
pub type Attributes = BTreeMap<String, String>;

/// One hosted static asset.
///
/// The remote side is a manifest of these returned by the service; the local
/// side is derived by hashing files under the hosting root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingAsset {
    path: String,
    digest: String,
    size: u64,
    attributes: Attributes,
}

impl HostingAsset {
    /// Build an asset, normalising its path, digest, and attribute names
    pub fn new(
        path: &str,
        digest: &str,
        size: u64,
        attributes: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, SnapshotError> {
        let path = normalize_path(path)?;
        let digest = canonical_digest(&path, digest)?;
        Ok(Self {
            path,
            digest,
            size,
            attributes: normalize_attributes(attributes),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

/// Lower-case attribute names; header names are case-insensitive
pub fn normalize_attributes(attributes: impl IntoIterator<Item = (String, String)>) -> Attributes {
    attributes
        .into_iter()
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value))
        .collect()
}
