//! Proof-of-work: nonce search against a leading-zero target.
use crate::constants::{DEFAULT_DIFFICULTY, HASH_HEX_SIZE};
use crate::error::{LedgerError, MiningError};
use crate::Block;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Number of leading `'0'` hex characters a block digest must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Difficulty(u32);

impl Difficulty {
    pub const ZERO: Difficulty = Difficulty(0);
    pub const MAX: u32 = HASH_HEX_SIZE as u32;

    pub fn new(zeros: u32) -> Result<Self, LedgerError> {
        if zeros > Self::MAX {
            return Err(LedgerError::InvalidDifficulty {
                requested: zeros,
                max: Self::MAX,
            });
        }
        Ok(Self(zeros))
    }

    pub fn zeros(self) -> u32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

impl TryFrom<u32> for Difficulty {
    type Error = LedgerError;

    fn try_from(zeros: u32) -> Result<Self, Self::Error> {
        Self::new(zeros)
    }
}

impl From<Difficulty> for u32 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// True when the first `difficulty` characters of `hash` are all `'0'`.
pub fn meets_target(hash: &str, difficulty: Difficulty) -> bool {
    let zeros = difficulty.zeros() as usize;
    hash.len() >= zeros && hash.bytes().take(zeros).all(|b| b == b'0')
}

/// Mine the block by incrementing the nonce, starting from its current value,
/// until the hash has at least `difficulty` leading zero hex digits.
///
/// There is no upper bound on the number of attempts. Use [`mine_until`] when
/// the caller needs a way out.
pub fn mine_block(mut block: Block, difficulty: Difficulty) -> Block {
    debug!(index = block.index(), %difficulty, "mining started");
    let mut attempts = 1u64;
    while !block.meets_difficulty(difficulty) {
        block.increment_nonce();
        attempts += 1;
    }
    info!(
        index = block.index(),
        nonce = block.nonce(),
        hash = block.hash(),
        attempts,
        "mined block"
    );
    block
}

/// Same search as [`mine_block`], but `should_continue` is asked before every
/// nonce increment with the number of nonces tried so far. When it returns
/// `false` the search stops with [`MiningError::Cancelled`].
///
/// If never cancelled, the winning nonce is the one `mine_block` would find.
pub fn mine_until<F>(
    mut block: Block,
    difficulty: Difficulty,
    mut should_continue: F,
) -> Result<Block, MiningError>
where
    F: FnMut(u64) -> bool,
{
    debug!(index = block.index(), %difficulty, "mining started");
    let mut attempts = 0u64;
    loop {
        attempts += 1;
        if block.meets_difficulty(difficulty) {
            info!(
                index = block.index(),
                nonce = block.nonce(),
                hash = block.hash(),
                attempts,
                "mined block"
            );
            return Ok(block);
        }
        if !should_continue(attempts) {
            debug!(index = block.index(), attempts, "mining cancelled");
            return Err(MiningError::Cancelled {
                attempts,
                last_nonce: block.nonce(),
            });
        }
        block.increment_nonce();
    }
}

/// Cancellable search driven by a shared stop flag, checked once per nonce.
pub fn mine_with_cancel(
    block: Block,
    difficulty: Difficulty,
    stop: &AtomicBool,
) -> Result<Block, MiningError> {
    mine_until(block, difficulty, |_| !stop.load(Ordering::Relaxed))
}
