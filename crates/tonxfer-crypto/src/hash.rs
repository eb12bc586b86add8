//! SHA-256 hashing.
//!
//! Used for cell content fingerprints and the simplified wallet address.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 hash of arbitrary data.
///
/// Returns a fixed 32-byte digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}
