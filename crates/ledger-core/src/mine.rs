use crate::{
    hasher::block_digest,
    pow::{meets_target, mine_block, Difficulty},
    Block,
};
use rayon::prelude::*;
use tracing::info;

/// Mines a block by searching nonces in parallel, from the block's current
/// nonce upward, until a hash has at least `difficulty` leading zero hex digits.
///
/// The nonce range is split across the rayon pool and the first worker to hit
/// a valid hash wins. The result satisfies the target but is not necessarily
/// the smallest valid nonce, so it can differ from [`mine_block`] and from one
/// run to the next.
pub fn mine_block_parallel(mut block: Block, difficulty: Difficulty) -> Block {
    if block.meets_difficulty(difficulty) {
        return block;
    }

    let start = block.nonce();
    let template = &block;
    let found = (start..u64::MAX).into_par_iter().find_any(|nonce| {
        let hash = block_digest(
            template.index(),
            template.timestamp(),
            template.data(),
            template.previous_hash(),
            *nonce,
        );
        meets_target(&hash, difficulty)
    });

    match found {
        Some(nonce) => {
            block.set_nonce(nonce);
            info!(
                index = block.index(),
                nonce,
                hash = block.hash(),
                "mined block (parallel)"
            );
            block
        }
        // Nothing in [start, u64::MAX): the sequential miner checks u64::MAX
        // and then wraps around into [0, start).
        None => {
            block.set_nonce(u64::MAX);
            mine_block(block, difficulty)
        }
    }
}
