//! File fingerprints
//!
//! The loader is append-only, so loading the same extract twice duplicates its
//! rows. Each loaded file is fingerprinted with SHA-256 so repeats are visible
//! in the run log.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of an in-memory buffer
pub fn bytes_sha256(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
