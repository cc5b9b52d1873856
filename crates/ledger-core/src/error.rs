use thiserror::Error;

/// Outcomes of a nonce search that did not produce a mined block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MiningError {
    #[error("mining cancelled after {attempts} attempts (last nonce {last_nonce})")]
    Cancelled { attempts: u64, last_nonce: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The chain has no blocks. Construction always mines a genesis block,
    /// so hitting this means a ledger invariant was broken.
    #[error("chain is empty")]
    EmptyChain,

    #[error("difficulty {requested} exceeds the digest length of {max} hex characters")]
    InvalidDifficulty { requested: u32, max: u32 },

    #[error(transparent)]
    Mining(#[from] MiningError),

    #[error("block {index} is invalid: {reason}")]
    InvalidBlock { index: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
