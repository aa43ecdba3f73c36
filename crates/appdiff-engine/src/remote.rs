//! Remote snapshot access
//!
//! The deployed side of each facet comes from a [`RemoteSnapshotAccessor`].
//! [`ExportedAppAccessor`] serves an exported app document from disk. Its
//! wire shapes are explicit serde structs, converted to the core model per
//! facet so a malformed hosting manifest never breaks a config-only diff.

use appdiff_core::errors::{ExError, ExErrorKind, Result, SnapshotError};
use appdiff_core::{ConfigTree, DependencySnapshot, FileNode, HostingAsset};
use base64::Engine;
use serde::Deserialize;
use std::path::Path;

/// Read access to the deployed version of an app.
///
/// All failures, including authentication and malformed responses, are
/// `ExErrorKind::Service`.
pub trait RemoteSnapshotAccessor: Send + Sync {
    /// Fetch the deployed configuration tree
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Service` if the tree cannot be fetched or interpreted.
    fn fetch_remote_config(&self, group_id: &str, app_id: &str) -> Result<ConfigTree>;

    /// Fetch the deployed dependency digest; never-configured means absent
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Service` if the snapshot cannot be fetched or interpreted.
    fn fetch_dependency_snapshot(&self, group_id: &str, app_id: &str)
        -> Result<DependencySnapshot>;

    /// Fetch the deployed hosting manifest; never-configured means empty
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Service` if the manifest cannot be fetched or interpreted.
    fn fetch_hosting_manifest(&self, group_id: &str, app_id: &str) -> Result<Vec<HostingAsset>>;
}

#[derive(Debug, Clone, Deserialize)]
struct ExportedApp {
    group_id: String,
    app_id: String,
    #[serde(default)]
    config: Vec<ConfigEntryWire>,
    #[serde(default)]
    dependencies: Option<DependenciesWire>,
    #[serde(default)]
    hosting: Option<Vec<HostingAssetWire>>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ContentEncoding {
    #[default]
    Utf8,
    Base64,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigEntryWire {
    path: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: ContentEncoding,
    #[serde(default)]
    directory: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct DependenciesWire {
    #[serde(default = "present_by_default")]
    present: bool,
    #[serde(default)]
    digest: Option<String>,
}

fn present_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
struct HostingAttributeWire {
    name: String,
    value: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HostingAssetWire {
    path: String,
    hash: String,
    size: u64,
    #[serde(default)]
    attrs: Vec<HostingAttributeWire>,
}

fn malformed(what: &str, reason: impl ToString) -> ExError {
    SnapshotError::MalformedResponse {
        what: what.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Serves the remote side from an exported app document
#[derive(Debug, Clone)]
pub struct ExportedAppAccessor {
    document: ExportedApp,
}

impl ExportedAppAccessor {
    /// Load an exported app document from `path`
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Service` if the document cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path).map_err(|e| {
            ExError::new(ExErrorKind::Service)
                .with_op("load_exported_app")
                .with_path(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_slice(&raw).map_err(|e| e.with_path(path.display().to_string()))
    }

    /// Parse an exported app document
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Service` if the document is not valid JSON of the
    /// expected shape.
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let document: ExportedApp = serde_json::from_slice(raw)
            .map_err(|e| malformed("exported app", e).with_op("load_exported_app"))?;
        Ok(Self { document })
    }

    /// Group id the document was exported from
    pub fn group_id(&self) -> &str {
        &self.document.group_id
    }

    /// App id the document was exported from
    pub fn app_id(&self) -> &str {
        &self.document.app_id
    }

    fn check_identity(&self, op: &str, group_id: &str, app_id: &str) -> Result<&ExportedApp> {
        let doc = &self.document;
        if doc.group_id != group_id || doc.app_id != app_id {
            return Err(ExError::new(ExErrorKind::Service)
                .with_op(op.to_string())
                .with_app_id(app_id)
                .with_message(format!(
                    "exported document belongs to {}/{}, not {}/{}",
                    doc.group_id, doc.app_id, group_id, app_id
                )));
        }
        Ok(doc)
    }
}

fn decode_content(entry: &ConfigEntryWire) -> Result<Vec<u8>> {
    match entry.encoding {
        ContentEncoding::Utf8 => Ok(entry.content.clone().into_bytes()),
        ContentEncoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(entry.content.as_bytes())
            .map_err(|e| malformed("config entry", format!("{}: {}", entry.path, e))),
    }
}

impl RemoteSnapshotAccessor for ExportedAppAccessor {
    fn fetch_remote_config(&self, group_id: &str, app_id: &str) -> Result<ConfigTree> {
        const OP: &str = "fetch_remote_config";
        let doc = self.check_identity(OP, group_id, app_id)?;

        let mut tree = ConfigTree::new();
        for entry in &doc.config {
            let content = if entry.directory {
                Vec::new()
            } else {
                decode_content(entry)?
            };
            let node = FileNode::from_parts(&entry.path, content, entry.directory)
                .map_err(|e| malformed("config tree", e).with_op(OP))?;
            tree.insert(node)
                .map_err(|e| malformed("config tree", e).with_op(OP))?;
        }
        Ok(tree)
    }

    fn fetch_dependency_snapshot(
        &self,
        group_id: &str,
        app_id: &str,
    ) -> Result<DependencySnapshot> {
        const OP: &str = "fetch_dependency_snapshot";
        let doc = self.check_identity(OP, group_id, app_id)?;

        match &doc.dependencies {
            None => Ok(DependencySnapshot::absent()),
            Some(deps) => DependencySnapshot::from_parts(deps.present, deps.digest.as_deref())
                .map_err(|e| malformed("dependency snapshot", e).with_op(OP)),
        }
    }

    fn fetch_hosting_manifest(&self, group_id: &str, app_id: &str) -> Result<Vec<HostingAsset>> {
        const OP: &str = "fetch_hosting_manifest";
        let doc = self.check_identity(OP, group_id, app_id)?;

        let Some(assets) = &doc.hosting else {
            return Ok(Vec::new());
        };
        assets
            .iter()
            .map(|asset| {
                HostingAsset::new(
                    &asset.path,
                    &asset.hash,
                    asset.size,
                    asset
                        .attrs
                        .iter()
                        .map(|a| (a.name.clone(), a.value.clone())),
                )
                .map_err(|e| malformed("hosting manifest", e).with_op(OP))
            })
            .collect()
    }
}
