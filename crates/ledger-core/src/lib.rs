//! Proof-of-work ledger simulation: hash-linked blocks, nonce mining and an
//! append-only chain.
pub mod address;
pub mod block;
pub mod chain;
pub mod clock;
pub mod constants;
pub mod error;
pub mod hasher;
pub mod mine;
pub mod pow;

pub use address::AddressProvider;
pub use block::Block;
pub use chain::{validate_chain, Ledger, LedgerConfig, MiningStrategy};
pub use clock::{Clock, FixedClock, SystemClock, Timestamp};
pub use error::{LedgerError, MiningError};
pub use pow::Difficulty;
