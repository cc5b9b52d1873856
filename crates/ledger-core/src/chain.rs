use crate::clock::{Clock, SystemClock};
use crate::constants::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};
use crate::error::{LedgerError, Result};
use crate::mine::mine_block_parallel;
use crate::pow::{mine_block, mine_until, Difficulty};
use crate::Block;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the ledger searches for nonces when it mines a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MiningStrategy {
    /// Single thread; always finds the smallest valid nonce.
    #[default]
    Sequential,
    /// Rayon pool; finds some valid nonce.
    Parallel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub difficulty: Difficulty,
    #[serde(default)]
    pub strategy: MiningStrategy,
}

impl LedgerConfig {
    pub fn new(difficulty: u32) -> Result<Self> {
        Ok(Self {
            difficulty: Difficulty::new(difficulty)?,
            strategy: MiningStrategy::Sequential,
        })
    }

    pub fn with_strategy(mut self, strategy: MiningStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Append-only chain of mined blocks.
///
/// Appending takes `&mut self` and only pushes a block once it is mined, so
/// anyone holding `&Ledger` sees complete blocks only.
#[derive(Debug)]
pub struct Ledger<C: Clock = SystemClock> {
    chain: Vec<Block>,
    config: LedgerConfig,
    clock: C,
}

impl Ledger<SystemClock> {
    /// Creates the ledger and mines its genesis block.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    pub fn with_clock(config: LedgerConfig, clock: C) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            config,
            clock,
        };
        ledger.create_genesis_block();
        ledger
    }

    fn create_genesis_block(&mut self) {
        let genesis = Block::new(0, self.clock.now(), GENESIS_DATA, GENESIS_PREVIOUS_HASH);
        let genesis = self.mine(genesis);
        debug!(hash = genesis.hash(), "genesis block created");
        self.chain.push(genesis);
    }

    fn mine(&self, block: Block) -> Block {
        match self.config.strategy {
            MiningStrategy::Sequential => mine_block(block, self.config.difficulty),
            MiningStrategy::Parallel => mine_block_parallel(block, self.config.difficulty),
        }
    }

    /// Builds the successor of the current tail, not yet mined.
    fn next_block(&self, data: String) -> Result<Block> {
        let latest = self.latest_block()?;
        Ok(Block::new(
            latest.index() + 1,
            self.clock.now(),
            data,
            latest.hash(),
        ))
    }

    fn append(&mut self, block: Block) -> Result<&Block> {
        debug!(index = block.index(), "block appended");
        self.chain.push(block);
        self.latest_block()
    }

    pub fn latest_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Mines a block carrying `data` on top of the current tail and appends it.
    pub fn add_block(&mut self, data: impl Into<String>) -> Result<&Block> {
        let block = self.next_block(data.into())?;
        let mined = self.mine(block);
        self.append(mined)
    }

    /// Like [`Ledger::add_block`], with a sequential search that stops when
    /// `should_continue` returns `false`. A cancelled append leaves the chain
    /// untouched.
    pub fn add_block_until<F>(&mut self, data: impl Into<String>, should_continue: F) -> Result<&Block>
    where
        F: FnMut(u64) -> bool,
    {
        let block = self.next_block(data.into())?;
        let mined = mine_until(block, self.config.difficulty, should_continue)?;
        self.append(mined)
    }

    /// Checks every chain invariant against this ledger's difficulty.
    pub fn validate(&self) -> Result<()> {
        validate_chain(&self.chain, self.config.difficulty)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.chain.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.chain.iter()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}

impl<'a, C: Clock> IntoIterator for &'a Ledger<C> {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain.iter()
    }
}

/// Verifies a sequence of blocks as a chain: genesis shape, consecutive
/// indices, hash links, cached hashes and the difficulty target.
/// Reports the first offending block.
pub fn validate_chain(blocks: &[Block], difficulty: Difficulty) -> Result<()> {
    let genesis = blocks.first().ok_or(LedgerError::EmptyChain)?;
    if genesis.index() != 0 {
        return Err(invalid(genesis, "genesis index is not 0"));
    }
    if genesis.previous_hash() != GENESIS_PREVIOUS_HASH {
        return Err(invalid(genesis, "genesis previous hash is not the sentinel"));
    }

    for block in blocks {
        if !block.verify_hash() {
            return Err(invalid(block, "stored hash does not match contents"));
        }
        if !block.meets_difficulty(difficulty) {
            return Err(invalid(block, "hash does not meet the difficulty target"));
        }
    }

    for pair in blocks.windows(2) {
        let (prev, block) = (&pair[0], &pair[1]);
        if block.index() != prev.index().wrapping_add(1) {
            return Err(invalid(block, "index does not follow its predecessor"));
        }
        if block.previous_hash() != prev.hash() {
            return Err(invalid(block, "previous hash does not link to its predecessor"));
        }
    }
    Ok(())
}

fn invalid(block: &Block, reason: &str) -> LedgerError {
    LedgerError::InvalidBlock {
        index: block.index(),
        reason: reason.to_string(),
    }
}
