//! Dependency archive preparation interface.

use crate::errors::ExError;
use std::path::{Path, PathBuf};

/// A dependency archive ready for upload, with its content digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedArchive {
    pub path: PathBuf,
    pub digest: String,
}

/// Assembles the local dependency archive for an application.
#[allow(clippy::result_large_err)]
pub trait DependencyPreparer: Send + Sync {
    /// Prepare the archive for the app rooted at `app_root`.
    ///
    /// Returns `None` when the app declares no dependencies.
    ///
    /// # Errors
    ///
    /// `ExErrorKind::Build` if dependencies are declared but no archive can
    /// be assembled; `ExErrorKind::Io` on read failures.
    fn prepare(&self, app_root: &Path) -> Result<Option<PreparedArchive>, ExError>;
}
