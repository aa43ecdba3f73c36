use crate::errors::SnapshotError;
use crate::path::normalize_path;

/// One named entry of a configuration snapshot.
///
/// Identity is the normalised relative path within its snapshot. Directory
/// nodes never carry content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    relative_path: String,
    content: Vec<u8>,
    is_directory: bool,
}

impl FileNode {
    /// Create a file node, normalising its path
    pub fn file(path: &str, content: impl Into<Vec<u8>>) -> Result<Self, SnapshotError> {
        Ok(Self {
            relative_path: normalize_path(path)?,
            content: content.into(),
            is_directory: false,
        })
    }

    /// Create a directory node, normalising its path
    pub fn directory(path: &str) -> Result<Self, SnapshotError> {
        Ok(Self {
            relative_path: normalize_path(path)?,
            content: Vec::new(),
            is_directory: true,
        })
    }

    /// Create a node from raw parts, enforcing the directory invariant
    pub fn from_parts(
        path: &str,
        content: Vec<u8>,
        is_directory: bool,
    ) -> Result<Self, SnapshotError> {
        if is_directory {
            if !content.is_empty() {
                return Err(SnapshotError::DirectoryWithContent {
                    path: path.to_string(),
                });
            }
            Self::directory(path)
        } else {
            Self::file(path, content)
        }
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }
}
