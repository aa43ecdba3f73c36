use super::layout::{is_excluded_from_config, is_under, APP_CONFIG_FILES};
use super::relative_to;
use crate::errors::{io_error, walk_error, Result};
use appdiff_core::{ConfigTree, ExError, ExErrorKind, FileNode};
use std::path::Path;
use walkdir::WalkDir;

/// Read the configuration tree of the app rooted at `root`.
///
/// Directories become directory nodes; symlinks are kept only when they
/// resolve to regular files.
///
/// # Errors
///
/// `ExErrorKind::Io` if `root` is not an app directory or any entry cannot
/// be read.
pub fn load_config_tree(root: &Path) -> Result<ConfigTree> {
    load_tree(root, None)
}

/// Like [`load_config_tree`], additionally skipping `hosting_root` when it
/// lies inside the app directory.
///
/// # Errors
///
/// Same as [`load_config_tree`].
pub fn load_config_tree_with_hosting(root: &Path, hosting_root: &Path) -> Result<ConfigTree> {
    let hosting = hosting_dir_within(root, hosting_root);
    load_tree(root, hosting.as_deref())
}

/// `hosting_root` relative to `root`, or `None` when it lies elsewhere (or is
/// the root itself)
fn hosting_dir_within(root: &Path, hosting_root: &Path) -> Option<String> {
    let rel = relative_to(root, hosting_root).ok().or_else(|| {
        let root = root.canonicalize().ok()?;
        let hosting_root = hosting_root.canonicalize().ok()?;
        relative_to(&root, &hosting_root).ok()
    })?;
    (!rel.is_empty()).then_some(rel)
}

fn ensure_app_dir(root: &Path) -> Result<()> {
    let is_app = root.is_dir() && APP_CONFIG_FILES.iter().any(|name| root.join(name).is_file());
    if is_app {
        return Ok(());
    }
    Err(ExError::new(ExErrorKind::Io)
        .with_op("load_config_tree")
        .with_path(root.display().to_string())
        .with_message(format!("no app directory found at {}", root.display())))
}

fn load_tree(root: &Path, hosting_dir: Option<&str>) -> Result<ConfigTree> {
    ensure_app_dir(root)?;

    let mut tree = ConfigTree::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match relative_to(root, entry.path()) {
            Ok(rel) => {
                !is_excluded_from_config(&rel) && !hosting_dir.is_some_and(|h| is_under(&rel, h))
            }
            Err(_) => true,
        });

    for entry in walker {
        let entry = entry.map_err(|e| walk_error("load_config_tree", e))?;
        let rel = relative_to(root, entry.path())?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            tree.insert(FileNode::directory(&rel)?)?;
            continue;
        }

        if file_type.is_symlink() {
            match std::fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => {}
                _ => {
                    tracing::debug!(path = %rel, "skipping symlink that is not a regular file");
                    continue;
                }
            }
        } else if !file_type.is_file() {
            continue;
        }

        let content = std::fs::read(entry.path())
            .map_err(|e| io_error("load_config_tree", entry.path(), e))?;
        tree.insert(FileNode::file(&rel, content)?)?;
    }

    Ok(tree)
}
