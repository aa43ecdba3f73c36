//! Hosting facet: local files against the deployed asset manifest.
//!
//! Local digests come from the asset cache when the file's signature still
//! matches the cached one; everything else is hashed in parallel and written
//! back. A broken cache never fails the diff, it only costs re-hashing.

#![allow(clippy::result_large_err)]

use super::diff::{DiffRequest, DiffServices};
use appdiff_core::diff::diff_hosting_assets;
use appdiff_core::digest::canonical_digest;
use appdiff_core::errors::Result;
use appdiff_core::model::Attributes;
use appdiff_core::{
    log_op_end, log_op_error, log_op_start, AssetCache, ContentHasher, DiffEntry, HostingAsset,
};
use appdiff_store::errors::io_error;
use appdiff_store::local::{load_hosting_files, load_hosting_metadata, HostingFile};
use rayon::prelude::*;

/// Counters describing how local digests were obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostingDiffStats {
    pub local_files: usize,
    pub cache_hits: usize,
    pub rehashed: usize,
    pub cache_failures: usize,
}

/// Hosting entries plus the cache statistics of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingDiffOutcome {
    pub entries: Vec<DiffEntry>,
    pub stats: HostingDiffStats,
}

/// Compare local hosting files against the deployed manifest
///
/// # Errors
///
/// `Io` if local files cannot be listed or hashed, `Service` if the manifest
/// cannot be fetched. Cache failures are logged and recovered.
pub fn diff_hosting(request: &DiffRequest, services: &DiffServices<'_>) -> Result<HostingDiffOutcome> {
    let ctx = &request.context;
    log_op_start!(
        "diff_hosting",
        request_id = %ctx.request.request_id,
        app_id = ctx.app_id.as_str(),
        hosting_root = %request.local.hosting_root.display()
    );
    let start = std::time::Instant::now();

    let result = diff_hosting_impl(request, services).map_err(|e| {
        log_op_error!(
            "diff_hosting",
            &e,
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "diff_hosting",
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = result.entries.len(),
        cache_hits = result.stats.cache_hits,
        rehashed = result.stats.rehashed
    );

    Ok(result)
}

fn diff_hosting_impl(
    request: &DiffRequest,
    services: &DiffServices<'_>,
) -> Result<HostingDiffOutcome> {
    let ctx = &request.context;

    let (local, remote) = rayon::join(
        || local_assets(request, services),
        || services.remote.fetch_hosting_manifest(&ctx.group_id, &ctx.app_id),
    );
    let (local, stats) = local?;
    let remote = remote?;

    let entries = diff_hosting_assets(&local, &remote)?;
    Ok(HostingDiffOutcome { entries, stats })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigestSource {
    Cached,
    Hashed { cache_failed: bool },
}

fn local_assets(
    request: &DiffRequest,
    services: &DiffServices<'_>,
) -> Result<(Vec<HostingAsset>, HostingDiffStats)> {
    let app_id = request.context.app_id.as_str();
    let files = load_hosting_files(&request.local.hosting_root)?;
    let metadata = load_hosting_metadata(&request.local.hosting_dir())?;

    let resolved = files
        .par_iter()
        .map(|file| resolve_digest(app_id, file, services.cache, services.hasher))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = HostingDiffStats {
        local_files: files.len(),
        ..HostingDiffStats::default()
    };
    let mut assets = Vec::with_capacity(files.len());
    for (file, (digest, source)) in files.iter().zip(resolved) {
        match source {
            DigestSource::Cached => stats.cache_hits += 1,
            DigestSource::Hashed { cache_failed } => {
                stats.rehashed += 1;
                if cache_failed {
                    stats.cache_failures += 1;
                }
            }
        }
        let attributes: Attributes = metadata.get(&file.path).cloned().unwrap_or_default();
        assets.push(HostingAsset::new(
            &file.path,
            &digest,
            file.signature.size,
            attributes,
        )?);
    }

    tracing::debug!(
        local_files = stats.local_files,
        cache_hits = stats.cache_hits,
        rehashed = stats.rehashed,
        cache_failures = stats.cache_failures,
        "local hosting digests resolved"
    );
    Ok((assets, stats))
}

fn resolve_digest(
    app_id: &str,
    file: &HostingFile,
    cache: &dyn AssetCache,
    hasher: &dyn ContentHasher,
) -> Result<(String, DigestSource)> {
    let mut cache_failed = false;

    match cache.get(app_id, &file.path) {
        Ok(Some(entry)) if entry.is_valid_for(&file.signature) => {
            if let Ok(digest) = canonical_digest(&file.path, &entry.digest) {
                return Ok((digest, DigestSource::Cached));
            }
        }
        Ok(_) => {}
        Err(err) => {
            tracing::warn!(
                app_id = app_id,
                path = file.path.as_str(),
                err_code = err.code(),
                error = %err,
                "asset cache read failed, re-hashing"
            );
            cache_failed = true;
        }
    }

    let digest = hasher
        .hash_file(&file.location)
        .map_err(|e| io_error("hash_hosting_file", &file.location, e))?;

    if let Err(err) = cache.put(app_id, &file.path, &digest, file.signature) {
        tracing::warn!(
            app_id = app_id,
            path = file.path.as_str(),
            err_code = err.code(),
            error = %err,
            "asset cache write failed, digest not persisted"
        );
        cache_failed = true;
    }

    Ok((digest, DigestSource::Hashed { cache_failed }))
}
