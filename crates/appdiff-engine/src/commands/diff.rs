#![allow(clippy::result_large_err)]

use super::{config, dependency, hosting};
use crate::context::DiffContext;
use crate::remote::RemoteSnapshotAccessor;
use appdiff_core::errors::Result;
use appdiff_core::{
    log_op_end, log_op_error, log_op_start, AssetCache, ContentHasher, DependencyPreparer,
    DiffReport,
};
use appdiff_store::local::layout::{HOSTING_DIR, HOSTING_FILES_DIR};
use std::path::{Path, PathBuf};

/// Where the proposed version of the app lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalApp {
    pub root: PathBuf,
    pub hosting_root: PathBuf,
}

impl LocalApp {
    /// App rooted at `root` with hosting files in the default location
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let hosting_root = root.join(HOSTING_FILES_DIR);
        Self { root, hosting_root }
    }

    /// Override the hosting files root
    pub fn with_hosting_root(mut self, hosting_root: impl Into<PathBuf>) -> Self {
        self.hosting_root = hosting_root.into();
        self
    }

    /// Directory holding hosting metadata
    pub fn hosting_dir(&self) -> PathBuf {
        self.root.join(HOSTING_DIR)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Which optional facets to compare; configuration is always compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub include_dependencies: bool,
    pub include_hosting: bool,
}

/// One diff invocation
#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub local: LocalApp,
    pub context: DiffContext,
    pub options: DiffOptions,
}

/// Collaborators a diff runs against
#[derive(Clone, Copy)]
pub struct DiffServices<'a> {
    pub remote: &'a dyn RemoteSnapshotAccessor,
    pub cache: &'a dyn AssetCache,
    pub hasher: &'a dyn ContentHasher,
    pub preparer: &'a dyn DependencyPreparer,
}

/// Compare the local app against the deployed version.
///
/// Requested facets run concurrently. If any facet fails, the first error in
/// facet order (config, dependency, hosting) is returned and no partial
/// report is produced.
///
/// # Errors
///
/// Any fatal facet error: `Io`, `Service`, `Build`, `InvalidPath`, ...
pub fn diff(request: &DiffRequest, services: &DiffServices<'_>) -> Result<DiffReport> {
    let ctx = &request.context;
    log_op_start!(
        "diff",
        request_id = %ctx.request.request_id,
        command = ctx.request.command.as_deref().unwrap_or_default(),
        group_id = ctx.group_id.as_str(),
        app_id = ctx.app_id.as_str(),
        include_dependencies = request.options.include_dependencies,
        include_hosting = request.options.include_hosting
    );
    let start = std::time::Instant::now();

    let result = diff_impl(request, services).map_err(|e| {
        let e = e
            .with_app_id(ctx.app_id.clone())
            .with_request_id(ctx.request.request_id.clone());
        log_op_error!("diff", &e, duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %ctx.request.request_id,
        entry_count = result.len()
    );

    Ok(result)
}

fn diff_impl(request: &DiffRequest, services: &DiffServices<'_>) -> Result<DiffReport> {
    let options = request.options;

    let (config, (dependency, hosting)) = rayon::join(
        || config::diff_config(request, services),
        || {
            rayon::join(
                || {
                    options
                        .include_dependencies
                        .then(|| dependency::diff_dependency(request, services))
                },
                || {
                    options
                        .include_hosting
                        .then(|| hosting::diff_hosting(request, services))
                },
            )
        },
    );

    let config = config?;
    let dependency = dependency.transpose()?;
    let hosting = hosting.transpose()?.map(|outcome| outcome.entries);

    Ok(DiffReport::merge(config, dependency, hosting))
}
