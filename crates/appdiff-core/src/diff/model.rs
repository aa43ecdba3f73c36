//! Diff output types.

use serde::{Deserialize, Serialize};

/// Comparison dimension an entry belongs to.
///
/// Variant order is presentation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Config,
    Dependency,
    Hosting,
}

impl Facet {
    /// Position in the rendered report
    pub fn order(&self) -> u8 {
        match self {
            Facet::Config => 0,
            Facet::Dependency => 1,
            Facet::Hosting => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Config => "config",
            Facet::Dependency => "dependency",
            Facet::Hosting => "hosting",
        }
    }
}

/// How a path differs between local (proposed) and remote (deployed).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Present locally, absent remotely
    Added,
    /// Present remotely, absent locally
    Removed,
    /// Present on both sides with different content or attributes
    Changed,
}

impl ChangeKind {
    pub fn symbol(&self) -> char {
        match self {
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
            ChangeKind::Changed => '~',
        }
    }
}

/// A single difference in one facet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: ChangeKind,
    pub facet: Facet,
    pub path: String,
    pub detail: String,
}

impl DiffEntry {
    pub fn added(facet: Facet, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Added,
            facet,
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn removed(facet: Facet, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            facet,
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub fn changed(facet: Facet, path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Changed,
            facet,
            path: path.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.kind.symbol(),
            self.facet.label(),
            self.path
        )?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}
