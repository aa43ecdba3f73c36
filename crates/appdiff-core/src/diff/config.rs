//! Configuration facet comparison.

use crate::diff::model::{DiffEntry, Facet};
use crate::model::ConfigTree;
use std::collections::BTreeSet;

/// Compare local and remote configuration trees.
///
/// File content is compared byte-exactly; directory nodes are not diffed on
/// their own. Entries come out in path order. Both trees are keyed by
/// normalised path, so separator differences never show up as changes.
pub fn diff_config_trees(local: &ConfigTree, remote: &ConfigTree) -> Vec<DiffEntry> {
    let paths: BTreeSet<&str> = local
        .files()
        .chain(remote.files())
        .map(|n| n.relative_path())
        .collect();

    let mut entries = Vec::new();
    for path in paths {
        let l = local.get(path).filter(|n| !n.is_directory());
        let r = remote.get(path).filter(|n| !n.is_directory());
        match (l, r) {
            (Some(l), None) => entries.push(DiffEntry::added(
                Facet::Config,
                path,
                format!("{} bytes", l.content().len()),
            )),
            (None, Some(r)) => entries.push(DiffEntry::removed(
                Facet::Config,
                path,
                format!("{} bytes", r.content().len()),
            )),
            (Some(l), Some(r)) => {
                if l.content() != r.content() {
                    entries.push(DiffEntry::changed(
                        Facet::Config,
                        path,
                        format!(
                            "content: {} -> {} bytes",
                            r.content().len(),
                            l.content().len()
                        ),
                    ));
                }
            }
            (None, None) => {}
        }
    }
    entries
}
