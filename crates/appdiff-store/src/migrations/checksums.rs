//! Checksum validation for migrations
//!
//! SHA-256 of the migration SQL, recorded when applied and compared on
//! every later open.

use appdiff_core::digest::sha256_hex;

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    sha256_hex(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let checksum1 = compute_checksum("SELECT 1");
        let checksum2 = compute_checksum("SELECT 1");
        assert_eq!(checksum1, checksum2);
        assert_eq!(checksum1.len(), 64);
    }
}
