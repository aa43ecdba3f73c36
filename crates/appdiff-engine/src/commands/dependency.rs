#![allow(clippy::result_large_err)]

use super::diff::{DiffRequest, DiffServices};
use appdiff_core::diff::diff_dependencies;
use appdiff_core::errors::Result;
use appdiff_core::{log_op_end, log_op_error, log_op_start, DependencySnapshot, DiffEntry};

/// Compare the freshly prepared local dependency archive against the
/// deployed one
///
/// # Errors
///
/// `Build` if the archive cannot be assembled, `Service` if the remote
/// snapshot cannot be fetched.
pub fn diff_dependency(
    request: &DiffRequest,
    services: &DiffServices<'_>,
) -> Result<Vec<DiffEntry>> {
    let ctx = &request.context;
    log_op_start!(
        "diff_dependency",
        request_id = %ctx.request.request_id,
        app_id = ctx.app_id.as_str()
    );
    let start = std::time::Instant::now();

    let result = diff_dependency_impl(request, services).map_err(|e| {
        log_op_error!(
            "diff_dependency",
            &e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "diff_dependency",
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = result.len()
    );

    Ok(result)
}

fn diff_dependency_impl(
    request: &DiffRequest,
    services: &DiffServices<'_>,
) -> Result<Vec<DiffEntry>> {
    let ctx = &request.context;

    let (local, remote) = rayon::join(
        || services.preparer.prepare(request.local.root()),
        || services.remote.fetch_dependency_snapshot(&ctx.group_id, &ctx.app_id),
    );

    let local = match local? {
        Some(archive) => DependencySnapshot::present(&archive.digest)?,
        None => DependencySnapshot::absent(),
    };
    let remote = remote?;

    Ok(diff_dependencies(&local, &remote))
}
