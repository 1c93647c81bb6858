//! Content identity for string records.
//!
//! The hash is computed over the raw UTF-8 bytes of the value: no trimming,
//! no case folding. It identifies records in API responses; uniqueness is
//! enforced on `value` by the store, not on this hash.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of `text`.
pub fn content_digest(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

/// Computes the lowercase hex content hash of `text`.
pub fn content_hash(text: &str) -> String {
    hex::encode(content_digest(text))
}
