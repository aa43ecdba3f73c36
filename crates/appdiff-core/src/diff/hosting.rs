//! Hosting facet comparison.
//!
//! Pure set comparison of hosting assets. Producing the local digests (and
//! consulting the asset cache while doing so) happens in the engine.

use crate::diff::model::{DiffEntry, Facet};
use crate::errors::SnapshotError;
use crate::model::HostingAsset;
use std::collections::{BTreeMap, BTreeSet};

pub const DETAIL_CONTENT: &str = "content";
pub const DETAIL_ATTRIBUTES: &str = "attributes";

fn index(assets: &[HostingAsset]) -> Result<BTreeMap<&str, &HostingAsset>, SnapshotError> {
    let mut map = BTreeMap::new();
    for asset in assets {
        if map.insert(asset.path(), asset).is_some() {
            return Err(SnapshotError::DuplicatePath {
                path: asset.path().to_string(),
            });
        }
    }
    Ok(map)
}

/// Compare local hosting assets against the remote manifest.
///
/// A digest difference wins over an attribute difference: an asset whose
/// content and attributes both changed is reported once, as `content`.
///
/// # Errors
///
/// `SnapshotError::DuplicatePath` if either side lists a path twice.
pub fn diff_hosting_assets(
    local: &[HostingAsset],
    remote: &[HostingAsset],
) -> Result<Vec<DiffEntry>, SnapshotError> {
    let local = index(local)?;
    let remote = index(remote)?;
    let paths: BTreeSet<&str> = local.keys().chain(remote.keys()).copied().collect();

    let mut entries = Vec::new();
    for path in paths {
        match (local.get(path), remote.get(path)) {
            (Some(l), None) => entries.push(DiffEntry::added(
                Facet::Hosting,
                path,
                format!("{} bytes", l.size()),
            )),
            (None, Some(r)) => entries.push(DiffEntry::removed(
                Facet::Hosting,
                path,
                format!("{} bytes", r.size()),
            )),
            (Some(l), Some(r)) => {
                if l.digest() != r.digest() {
                    entries.push(DiffEntry::changed(Facet::Hosting, path, DETAIL_CONTENT));
                } else if l.attributes() != r.attributes() {
                    entries.push(DiffEntry::changed(Facet::Hosting, path, DETAIL_ATTRIBUTES));
                }
            }
            (None, None) => {}
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::ChangeKind;

    fn asset(path: &str, digest_char: char, content_type: Option<&str>) -> HostingAsset {
        let attrs: Vec<(String, String)> = content_type
            .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
            .unwrap_or_default();
        HostingAsset::new(path, &digest_char.to_string().repeat(64), 4, attrs).unwrap()
    }

    #[test]
    fn test_all_classifications() {
        let local = vec![
            asset("/new.css", 'a', None),
            asset("/same.html", 'b', Some("text/html")),
            asset("/content.js", 'c', None),
            asset("/attrs.png", 'd', Some("image/png")),
        ];
        let remote = vec![
            asset("/gone.txt", 'e', None),
            asset("/same.html", 'b', Some("text/html")),
            asset("/content.js", 'f', None),
            asset("/attrs.png", 'd', Some("application/octet-stream")),
        ];
        let entries = diff_hosting_assets(&local, &remote).unwrap();
        let summary: Vec<(ChangeKind, &str, &str)> = entries
            .iter()
            .map(|e| (e.kind, e.path.as_str(), e.detail.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ChangeKind::Changed, "attrs.png", DETAIL_ATTRIBUTES),
                (ChangeKind::Changed, "content.js", DETAIL_CONTENT),
                (ChangeKind::Removed, "gone.txt", "4 bytes"),
                (ChangeKind::Added, "new.css", "4 bytes"),
            ]
        );
    }

    #[test]
    fn test_duplicate_manifest_path_rejected() {
        let remote = vec![asset("/a", 'a', None), asset("a", 'b', None)];
        assert!(matches!(
            diff_hosting_assets(&[], &remote),
            Err(SnapshotError::DuplicatePath { .. })
        ));
    }
}
