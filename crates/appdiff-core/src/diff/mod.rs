//! Application state diff.
//!
//! Compares the locally-authored application against the deployed one across
//! three independent facets and merges the results into one ordered report.
//!
//! ## Entry points
//!
//! ```ignore
//! use appdiff_core::diff::{diff_config_trees, DiffReport, render_report};
//!
//! let config = diff_config_trees(&local_tree, &remote_tree);
//! let report = DiffReport::merge(config, None, None);
//! println!("{}", render_report(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Reflexivity**: a snapshot compared against itself yields no entries.
//! - **Ordering**: Config entries precede Dependency entries, which precede
//!   Hosting entries; within a facet entries are ordered by path.
//! - **No deduplication**: the same path in two facets yields two entries.

pub mod config;
pub mod dependency;
pub mod hosting;
pub mod human_summary;
pub mod model;
pub mod report;

pub use config::diff_config_trees;
pub use dependency::{diff_dependencies, DEPENDENCY_ARCHIVE_PATH};
pub use hosting::diff_hosting_assets;
pub use human_summary::render_report;
pub use model::{ChangeKind, DiffEntry, Facet};
pub use report::DiffReport;
