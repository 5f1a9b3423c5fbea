//! Content checksums used as dataset cache keys.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw source content.
///
/// # Returns
/// Lowercase hexadecimal string representation of the hash.
pub fn calculate_checksum(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    hex::encode(hasher.finalize())
}
