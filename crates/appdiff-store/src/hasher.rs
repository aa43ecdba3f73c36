//! Streaming SHA-256 file hasher

use appdiff_core::digest::sha256_reader;
use appdiff_core::ContentHasher;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Hashes files by streaming them through SHA-256
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256FileHasher;

impl ContentHasher for Sha256FileHasher {
    fn hash_file(&self, path: &Path) -> std::io::Result<String> {
        let file = File::open(path)?;
        sha256_reader(BufReader::new(file))
    }
}
