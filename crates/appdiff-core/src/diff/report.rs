//! Merging facet results into one ordered report.

use crate::diff::model::DiffEntry;
use serde::{Deserialize, Serialize};

/// The unified diff across all requested facets.
///
/// An empty report means local and remote application states are equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffReport {
    entries: Vec<DiffEntry>,
}

impl DiffReport {
    /// Merge facet results in presentation order.
    ///
    /// `dependency` and `hosting` are `None` when the facet was not requested.
    /// Each facet's internal order is preserved; nothing is deduplicated.
    pub fn merge(
        config: Vec<DiffEntry>,
        dependency: Option<Vec<DiffEntry>>,
        hosting: Option<Vec<DiffEntry>>,
    ) -> Self {
        let mut entries = config;
        entries.extend(dependency.unwrap_or_default());
        entries.extend(hosting.unwrap_or_default());
        // stable: only moves entries across facet boundaries
        entries.sort_by_key(|e| e.facet.order());
        Self { entries }
    }

    pub fn entries(&self) -> &[DiffEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DiffEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One rendered line per entry
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{DiffEntry, Facet};

    #[test]
    fn test_facet_order_enforced() {
        let report = DiffReport::merge(
            vec![DiffEntry::added(Facet::Config, "z.json", "")],
            Some(vec![DiffEntry::changed(
                Facet::Dependency,
                "dependency-archive",
                "",
            )]),
            Some(vec![DiffEntry::added(Facet::Hosting, "a.html", "")]),
        );
        let facets: Vec<Facet> = report.entries().iter().map(|e| e.facet).collect();
        assert_eq!(facets, vec![Facet::Config, Facet::Dependency, Facet::Hosting]);
    }

    #[test]
    fn test_same_path_in_two_facets_kept() {
        let report = DiffReport::merge(
            vec![DiffEntry::added(Facet::Config, "index.html", "")],
            None,
            Some(vec![DiffEntry::added(Facet::Hosting, "index.html", "")]),
        );
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_empty_merge_is_sentinel() {
        assert!(DiffReport::merge(Vec::new(), Some(Vec::new()), None).is_empty());
    }
}
