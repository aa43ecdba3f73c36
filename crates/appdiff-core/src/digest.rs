//! Content digests and the file hashing seam.

use crate::errors::SnapshotError;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the lower-case hex SHA-256 digest of `content`
pub fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Stream a reader through SHA-256 without buffering it whole
pub fn sha256_reader<R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Validate a digest string and return its canonical lower-case form
///
/// # Errors
///
/// `SnapshotError::MalformedDigest` if the value is not 64 hex characters.
pub fn canonical_digest(subject: &str, digest: &str) -> Result<String, SnapshotError> {
    let trimmed = digest.trim();
    if trimmed.len() != DIGEST_HEX_LEN || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SnapshotError::MalformedDigest {
            subject: subject.to_string(),
            digest: digest.to_string(),
        });
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Computes digests of local files.
///
/// The hosting facet hashes through this trait so the work can be counted
/// and the algorithm swapped without touching the diff logic.
pub trait ContentHasher: Send + Sync {
    /// Hash the file at `path`
    fn hash_file(&self, path: &Path) -> std::io::Result<String>;
}
