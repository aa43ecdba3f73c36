//! appdiff Engine - Orchestration layer
//!
//! Loads each requested facet from the local app directory and the remote
//! side, runs the facet comparisons concurrently, and merges the results
//! into one report.

pub mod commands;
pub mod context;
pub mod remote;

pub use commands::hosting::{HostingDiffOutcome, HostingDiffStats};
pub use commands::diff::{diff, DiffOptions, DiffRequest, DiffServices, LocalApp};
pub use context::DiffContext;
pub use remote::{ExportedAppAccessor, RemoteSnapshotAccessor};
