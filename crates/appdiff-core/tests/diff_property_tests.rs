//! Property and scenario tests for the pure diff algorithms.
//!
//! All tests operate on in-memory snapshots (no I/O).

use appdiff_core::diff::{
    diff_config_trees, diff_dependencies, diff_hosting_assets, ChangeKind, DiffReport, Facet,
    DEPENDENCY_ARCHIVE_PATH,
};
use appdiff_core::{ConfigTree, DependencySnapshot, FileNode, HostingAsset};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tree_from(files: &BTreeMap<String, Vec<u8>>) -> ConfigTree {
    ConfigTree::from_nodes(
        files
            .iter()
            .map(|(p, c)| FileNode::file(p, c.clone()).unwrap()),
    )
    .unwrap()
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9_]{1,6}", 1..4).prop_map(|segs| segs.join("/"))
}

fn files_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(path_strategy(), prop::collection::vec(any::<u8>(), 0..16), 0..8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_config_diff_is_reflexive(files in files_strategy()) {
        let tree = tree_from(&files);
        prop_assert!(diff_config_trees(&tree, &tree).is_empty());
    }

    #[test]
    fn prop_swapping_sides_swaps_added_and_removed(
        files in files_strategy(),
        extra in path_strategy(),
    ) {
        prop_assume!(!files.contains_key(&extra));
        prop_assume!(!files.keys().any(|k| k.starts_with(&format!("{}/", extra))
            || extra.starts_with(&format!("{}/", k))));

        let remote = tree_from(&files);
        let mut with_extra = files.clone();
        with_extra.insert(extra.clone(), b"{}".to_vec());
        let local = tree_from(&with_extra);

        let forward = diff_config_trees(&local, &remote);
        let backward = diff_config_trees(&remote, &local);
        prop_assert_eq!(forward.len(), 1);
        prop_assert_eq!(backward.len(), 1);
        prop_assert_eq!(forward[0].kind, ChangeKind::Added);
        prop_assert_eq!(backward[0].kind, ChangeKind::Removed);
        prop_assert_eq!(&forward[0].path, &backward[0].path);
        prop_assert_eq!(forward[0].facet, backward[0].facet);
    }

    #[test]
    fn prop_report_orders_facets(
        config_paths in prop::collection::vec(path_strategy(), 0..4),
        hosting_paths in prop::collection::vec(path_strategy(), 0..4),
        with_dependency in any::<bool>(),
    ) {
        use appdiff_core::DiffEntry;
        // deliberately hand the facets in scrambled positions
        let hosting: Vec<DiffEntry> = hosting_paths
            .iter()
            .map(|p| DiffEntry::added(Facet::Hosting, p.clone(), ""))
            .collect();
        let config: Vec<DiffEntry> = config_paths
            .iter()
            .map(|p| DiffEntry::removed(Facet::Config, p.clone(), ""))
            .collect();
        let dependency = with_dependency
            .then(|| vec![DiffEntry::changed(Facet::Dependency, DEPENDENCY_ARCHIVE_PATH, "")]);

        let mut scrambled = hosting.clone();
        scrambled.extend(config.clone());
        let report = DiffReport::merge(scrambled, dependency, None);

        let orders: Vec<u8> = report.entries().iter().map(|e| e.facet.order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        prop_assert_eq!(orders, sorted);
        prop_assert_eq!(
            report.len(),
            config.len() + hosting.len() + usize::from(with_dependency)
        );
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_remote_only_file_is_removed() {
    let local = ConfigTree::from_nodes(vec![FileNode::file("a.json", b"{}".to_vec()).unwrap()])
        .unwrap();
    let remote = ConfigTree::from_nodes(vec![
        FileNode::file("a.json", b"{}".to_vec()).unwrap(),
        FileNode::file("b.json", b"{}".to_vec()).unwrap(),
    ])
    .unwrap();

    let report = DiffReport::merge(diff_config_trees(&local, &remote), None, None);
    assert_eq!(report.len(), 1);
    assert_eq!(report.entries()[0].kind, ChangeKind::Removed);
    assert_eq!(report.entries()[0].path, "b.json");
}

#[test]
fn test_scenario_dependency_digest_mismatch() {
    let d2 = "2".repeat(64);
    let d3 = "3".repeat(64);
    let local = DependencySnapshot::present(&d2).unwrap();
    let remote = DependencySnapshot::present(&d3).unwrap();

    let entries = diff_dependencies(&local, &remote);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ChangeKind::Changed);
    assert_eq!(entries[0].path, DEPENDENCY_ARCHIVE_PATH);
}

#[test]
fn test_windows_and_remote_separators_compare_equal() {
    let local = ConfigTree::from_nodes(vec![FileNode::file(
        "functions\\hello\\source.js",
        b"exports = 1".to_vec(),
    )
    .unwrap()])
    .unwrap();
    let remote = ConfigTree::from_nodes(vec![FileNode::file(
        "/functions/hello/source.js",
        b"exports = 1".to_vec(),
    )
    .unwrap()])
    .unwrap();
    assert!(diff_config_trees(&local, &remote).is_empty());
}

#[test]
fn test_paths_are_case_sensitive() {
    let local =
        ConfigTree::from_nodes(vec![FileNode::file("Config.json", b"{}".to_vec()).unwrap()])
            .unwrap();
    let remote =
        ConfigTree::from_nodes(vec![FileNode::file("config.json", b"{}".to_vec()).unwrap()])
            .unwrap();
    let entries = diff_config_trees(&local, &remote);
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_hosting_reflexive() {
    let assets = vec![
        HostingAsset::new("/index.html", &"a".repeat(64), 12, Vec::new()).unwrap(),
        HostingAsset::new("/img.png", &"b".repeat(64), 99, Vec::new()).unwrap(),
    ];
    assert!(diff_hosting_assets(&assets, &assets).unwrap().is_empty());
}
