//! Fingerprint hashing.

use cryptocond_der::{DerWriter, Tag};
use sha2::{Digest, Sha256};

use crate::constants::FINGERPRINT_LEN;

/// Fingerprint type.
pub type Fingerprint = [u8; FINGERPRINT_LEN];

/// Computes SHA-256 over a buffer.
pub(crate) fn sha256(data: &[u8]) -> Fingerprint {
    Sha256::digest(data).into()
}

/// Hashes the `SEQUENCE` produced by `f`, the shape every structured
/// fingerprint shares.
pub(crate) fn fingerprint_sequence(f: impl FnOnce(&mut DerWriter)) -> Fingerprint {
    let mut w = DerWriter::new();
    w.write_constructed(Tag::SEQUENCE, f);
    sha256(w.as_slice())
}
