use crate::clock::Timestamp;
use crate::hasher::block_digest;
use crate::pow::{meets_target, Difficulty};
use serde::{Deserialize, Serialize};

/// A single entry of the ledger.
///
/// `hash` always matches the digest of the other five fields: every method
/// that changes the nonce recomputes it before returning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: Timestamp,
    data: String,
    previous_hash: String,
    nonce: u64,
    hash: String,
}

impl Block {
    /// Builds a block with nonce 0.
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        data: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        Self::with_nonce(index, timestamp, data, previous_hash, 0)
    }

    pub fn with_nonce(
        index: u64,
        timestamp: Timestamp,
        data: impl Into<String>,
        previous_hash: impl Into<String>,
        nonce: u64,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            data: data.into(),
            previous_hash: previous_hash.into(),
            nonce,
            hash: String::new(),
        };
        block.recompute_hash();
        block
    }

    /// Digest of the current field values. Does not touch the cached hash.
    pub fn calculate_hash(&self) -> String {
        block_digest(
            self.index,
            self.timestamp,
            &self.data,
            &self.previous_hash,
            self.nonce,
        )
    }

    pub fn recompute_hash(&mut self) {
        self.hash = self.calculate_hash();
    }

    /// True when the cached hash matches the fields. Only a block that came
    /// in through deserialization can fail this.
    pub fn verify_hash(&self) -> bool {
        self.hash == self.calculate_hash()
    }

    pub fn meets_difficulty(&self, difficulty: Difficulty) -> bool {
        meets_target(&self.hash, difficulty)
    }

    pub(crate) fn increment_nonce(&mut self) {
        self.nonce = self.nonce.wrapping_add(1);
        self.recompute_hash();
    }

    pub(crate) fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
        self.recompute_hash();
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}
