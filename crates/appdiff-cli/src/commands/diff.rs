//! Diff command

use appdiff_core::diff::render_report;
use appdiff_core::{AssetCache, NullAssetCache};
use appdiff_engine::{
    diff, DiffContext, DiffOptions, DiffRequest, DiffServices, ExportedAppAccessor, LocalApp,
};
use appdiff_store::{FsDependencyPreparer, Sha256FileHasher, SqliteAssetCache};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Local app directory
    #[arg(long, default_value = ".")]
    pub local: PathBuf,

    /// Exported snapshot of the deployed app
    #[arg(long)]
    pub remote: PathBuf,

    /// App id (defaults to the one recorded in the exported snapshot)
    #[arg(long)]
    pub app_id: Option<String>,

    /// Group id (defaults to the one recorded in the exported snapshot)
    #[arg(long)]
    pub group_id: Option<String>,

    /// Include the dependency archive
    #[arg(short = 'd', long)]
    pub include_dependencies: bool,

    /// Include hosting files
    #[arg(short = 's', long)]
    pub include_hosting: bool,

    /// Hosting files directory (defaults to <local>/hosting/files)
    #[arg(long)]
    pub hosting_dir: Option<PathBuf>,

    /// Asset cache database
    #[arg(long, default_value = ".appdiff/cache.db")]
    pub cache: PathBuf,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let remote = ExportedAppAccessor::from_path(&args.remote)?;
    let group_id = args
        .group_id
        .unwrap_or_else(|| remote.group_id().to_string());
    let app_id = args.app_id.unwrap_or_else(|| remote.app_id().to_string());

    let mut local = LocalApp::new(&args.local);
    if let Some(hosting_dir) = args.hosting_dir {
        local = local.with_hosting_root(hosting_dir);
    }

    let options = DiffOptions {
        include_dependencies: args.include_dependencies,
        include_hosting: args.include_hosting,
    };

    // The cache only matters for hosting; a config-only diff never opens it.
    let sqlite_cache = if options.include_hosting {
        match SqliteAssetCache::open(&args.cache) {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!(
                    cache_path = %args.cache.display(),
                    error = %e,
                    "asset cache unavailable, hashing every hosting file"
                );
                None
            }
        }
    } else {
        None
    };
    let cache: &dyn AssetCache = match &sqlite_cache {
        Some(cache) => cache,
        None => &NullAssetCache,
    };

    let request = DiffRequest {
        local,
        context: DiffContext::new(group_id, app_id),
        options,
    };
    let services = DiffServices {
        remote: &remote,
        cache,
        hasher: &Sha256FileHasher,
        preparer: &FsDependencyPreparer,
    };

    let report = diff(&request, &services)?;
    println!("{}", render_report(&report));

    Ok(())
}
