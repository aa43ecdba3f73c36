use super::layout::{DEPENDENCY_ARCHIVES, FUNCTIONS_DIR, PACKAGE_MANIFEST};
use crate::errors::{build_error, io_error};
use appdiff_core::digest::sha256_reader;
use appdiff_core::{DependencyPreparer, ExError, PreparedArchive};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Picks up the prebuilt dependency archive in the functions directory
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDependencyPreparer;

impl DependencyPreparer for FsDependencyPreparer {
    fn prepare(&self, app_root: &Path) -> Result<Option<PreparedArchive>, ExError> {
        let functions = app_root.join(FUNCTIONS_DIR);

        let archive = DEPENDENCY_ARCHIVES
            .iter()
            .map(|name| functions.join(name))
            .find(|candidate| candidate.is_file());

        let Some(archive) = archive else {
            if functions.join(PACKAGE_MANIFEST).is_file() {
                return Err(build_error(format!(
                    "{}/{} declares dependencies but no node_modules archive was found",
                    FUNCTIONS_DIR, PACKAGE_MANIFEST
                ))
                .with_path(functions.display().to_string()));
            }
            return Ok(None);
        };

        let file = File::open(&archive)
            .map_err(|e| io_error("prepare_dependency_archive", &archive, e))?;
        let digest = sha256_reader(BufReader::new(file))
            .map_err(|e| io_error("prepare_dependency_archive", &archive, e))?;

        tracing::debug!(archive = %archive.display(), digest = %digest, "dependency archive prepared");
        Ok(Some(PreparedArchive {
            path: archive,
            digest,
        }))
    }
}
