//! Block content hashing.
//!
//! A block is hashed as the SHA-256 of its fields rendered as text and
//! concatenated with no separators, in the order
//! `index, timestamp, data, previous_hash, nonce`. Digests are lowercase hex.
use crate::clock::Timestamp;
use sha2::{Digest, Sha256};

pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

pub fn canonical_string(
    index: u64,
    timestamp: Timestamp,
    data: &str,
    previous_hash: &str,
    nonce: u64,
) -> String {
    format!("{index}{timestamp}{data}{previous_hash}{nonce}")
}

pub fn block_digest(
    index: u64,
    timestamp: Timestamp,
    data: &str,
    previous_hash: &str,
    nonce: u64,
) -> String {
    sha256_hex(canonical_string(index, timestamp, data, previous_hash, nonce).as_bytes())
}
