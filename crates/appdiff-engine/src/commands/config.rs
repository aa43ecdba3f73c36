#![allow(clippy::result_large_err)]

use super::diff::{DiffRequest, DiffServices};
use appdiff_core::diff::diff_config_trees;
use appdiff_core::errors::Result;
use appdiff_core::{log_op_end, log_op_error, log_op_start, DiffEntry};
use appdiff_store::local::load_config_tree_with_hosting;

/// Compare the local configuration tree against the deployed one
///
/// # Errors
///
/// `Io` if the local tree cannot be read, `Service` if the remote tree
/// cannot be fetched.
pub fn diff_config(request: &DiffRequest, services: &DiffServices<'_>) -> Result<Vec<DiffEntry>> {
    let ctx = &request.context;
    log_op_start!(
        "diff_config",
        request_id = %ctx.request.request_id,
        app_id = ctx.app_id.as_str()
    );
    let start = std::time::Instant::now();

    let result = diff_config_impl(request, services).map_err(|e| {
        log_op_error!(
            "diff_config",
            &e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "diff_config",
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = result.len()
    );

    Ok(result)
}

fn diff_config_impl(
    request: &DiffRequest,
    services: &DiffServices<'_>,
) -> Result<Vec<DiffEntry>> {
    let ctx = &request.context;

    let (local, remote) = rayon::join(
        || load_config_tree_with_hosting(request.local.root(), &request.local.hosting_root),
        || services.remote.fetch_remote_config(&ctx.group_id, &ctx.app_id),
    );
    let local = local?;
    let remote = remote?;

    tracing::debug!(
        local_nodes = local.len(),
        remote_nodes = remote.len(),
        "configuration trees loaded"
    );
    Ok(diff_config_trees(&local, &remote))
}
