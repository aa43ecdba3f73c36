//! Local application snapshot loading
//!
//! - Configuration tree (every regular file outside the excluded areas)
//! - Hosting files with their cache signatures
//! - Hosting attribute metadata
//! - Dependency archive preparation

mod config_loader;
mod dependency;
mod hosting_loader;
pub mod layout;

pub use config_loader::{load_config_tree, load_config_tree_with_hosting};
pub use dependency::FsDependencyPreparer;
pub use hosting_loader::{
    file_signature, load_hosting_files, load_hosting_metadata, HostingFile,
};

use crate::errors::Result;
use appdiff_core::ExError;
use appdiff_core::ExErrorKind;
use std::path::Path;

/// Relative path of `path` under `root`, `/`-separated
pub(crate) fn relative_to(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        ExError::new(ExErrorKind::Internal)
            .with_op("relative_path")
            .with_path(path.display().to_string())
            .with_message(format!("not under {}", root.display()))
    })?;

    let segments = rel
        .components()
        .map(|c| {
            c.as_os_str().to_str().ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidPath)
                    .with_op("relative_path")
                    .with_path(path.display().to_string())
                    .with_message("path is not valid UTF-8")
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(segments.join("/"))
}
