use super::layout::HOSTING_METADATA_FILE;
use super::relative_to;
use crate::errors::{io_error, walk_error, Result};
use appdiff_core::model::Attributes;
use appdiff_core::path::normalize_path;
use appdiff_core::{ExError, ExErrorKind, FileSignature};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// A local hosting file, located but not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingFile {
    /// Normalised path relative to the hosting root
    pub path: String,
    pub location: PathBuf,
    pub signature: FileSignature,
}

/// Size and modification time of a file
pub fn file_signature(meta: &Metadata) -> std::io::Result<FileSignature> {
    let modified = meta.modified()?;
    let modified_ns = match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_nanos()).unwrap_or(i64::MAX),
    };
    Ok(FileSignature::new(meta.len(), modified_ns))
}

/// List every regular file under `hosting_root`, sorted by path.
///
/// A missing root means the app hosts nothing locally.
///
/// # Errors
///
/// `ExErrorKind::Io` when the tree cannot be walked or a file's metadata
/// cannot be read.
pub fn load_hosting_files(hosting_root: &Path) -> Result<Vec<HostingFile>> {
    if !hosting_root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(hosting_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error("load_hosting_files", e))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let meta = std::fs::metadata(entry.path())
            .map_err(|e| io_error("load_hosting_files", entry.path(), e))?;
        if !meta.is_file() {
            continue;
        }

        let signature = file_signature(&meta)
            .map_err(|e| io_error("load_hosting_files", entry.path(), e))?;
        let path = normalize_path(&relative_to(hosting_root, entry.path())?)?;

        files.push(HostingFile {
            path,
            location: entry.path().to_path_buf(),
            signature,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[derive(Debug, Deserialize)]
struct MetadataEntry {
    path: String,
    #[serde(default)]
    attrs: Vec<MetadataAttribute>,
}

#[derive(Debug, Deserialize)]
struct MetadataAttribute {
    name: String,
    value: String,
}

/// Read `metadata.json` from `hosting_dir` into per-path attribute maps.
///
/// A missing file means no asset carries attributes.
///
/// # Errors
///
/// `ExErrorKind::Io` on read failure, `ExErrorKind::Serialization` when the
/// document is malformed, `ExErrorKind::InvalidPath` for unusable paths.
pub fn load_hosting_metadata(hosting_dir: &Path) -> Result<BTreeMap<String, Attributes>> {
    let file = hosting_dir.join(HOSTING_METADATA_FILE);
    let raw = match std::fs::read(&file) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(io_error("load_hosting_metadata", &file, e)),
    };

    let entries: Vec<MetadataEntry> = serde_json::from_slice(&raw).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("load_hosting_metadata")
            .with_path(file.display().to_string())
            .with_message(e.to_string())
    })?;

    let mut metadata = BTreeMap::new();
    for entry in entries {
        let path = normalize_path(&entry.path)?;
        let attrs = appdiff_core::model::hosting::normalize_attributes(
            entry.attrs.into_iter().map(|a| (a.name, a.value)),
        );
        metadata.insert(path, attrs);
    }
    Ok(metadata)
}
