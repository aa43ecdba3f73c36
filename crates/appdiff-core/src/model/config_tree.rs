use crate::errors::SnapshotError;
use crate::model::file_node::FileNode;
use std::collections::BTreeMap;

/// One side (local or remote) of an application's configuration and code.
///
/// Ordered by normalised path; paths are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    nodes: BTreeMap<String, FileNode>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nodes, rejecting duplicate paths
    pub fn from_nodes(nodes: impl IntoIterator<Item = FileNode>) -> Result<Self, SnapshotError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert(node)?;
        }
        Ok(tree)
    }

    /// Insert a node
    ///
    /// # Errors
    ///
    /// `SnapshotError::DuplicatePath` if a node with the same normalised
    /// path is already present.
    pub fn insert(&mut self, node: FileNode) -> Result<(), SnapshotError> {
        let key = node.relative_path().to_string();
        if self.nodes.contains_key(&key) {
            return Err(SnapshotError::DuplicatePath { path: key });
        }
        self.nodes.insert(key, node);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FileNode> {
        self.nodes.get(path)
    }

    /// All nodes in path order
    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values()
    }

    /// File nodes only, in path order
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.nodes.values().filter(|n| !n.is_directory())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
