//! Checksum calculation for dataset revisions.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of the raw dataset document.
///
/// Two stores built from byte-identical documents report the same checksum,
/// which lets consumers tell dataset revisions apart without diffing them.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
