//! Diff command orchestration.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for every facet:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal
//! details, plus `tracing::warn!()` here when the asset cache degrades.

pub mod config;
pub mod dependency;
pub mod diff;
pub mod hosting;
