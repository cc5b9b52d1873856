mod helpers;

use helpers::{fixed_ledger, ledger_with_blocks};
use ledger_core::constants::{GENESIS_DATA, GENESIS_PREVIOUS_HASH};
use ledger_core::hasher::block_digest;
use ledger_core::{
    validate_chain, Block, Difficulty, Ledger, LedgerConfig, LedgerError, MiningError,
    MiningStrategy,
};
use rand::{distributions::Alphanumeric, Rng};

#[test]
fn genesis_shape() -> anyhow::Result<()> {
    let ledger = Ledger::new(LedgerConfig::new(2)?);
    assert_eq!(ledger.len(), 1);
    let genesis = ledger.latest_block()?;
    assert_eq!(genesis.index(), 0);
    assert_eq!(genesis.previous_hash(), GENESIS_PREVIOUS_HASH);
    assert_eq!(genesis.data(), GENESIS_DATA);
    assert!(genesis.hash().starts_with("00"));
    Ok(())
}

#[test]
fn chain_linkage_and_indices() -> anyhow::Result<()> {
    let ledger = ledger_with_blocks(2, &["first", "second", "third", "fourth"]);
    assert_eq!(ledger.len(), 5);
    for (i, block) in ledger.iter().enumerate() {
        assert_eq!(block.index(), i as u64);
        assert!(block.verify_hash());
    }
    for pair in ledger.blocks().windows(2) {
        assert_eq!(pair[1].previous_hash(), pair[0].hash());
    }
    ledger.validate()?;
    Ok(())
}

#[test]
fn append_grows_by_one_and_keeps_history() -> anyhow::Result<()> {
    let mut ledger = Ledger::new(LedgerConfig::new(1)?);
    let mut rng = rand::thread_rng();
    for _ in 0..5 {
        let before: Vec<Block> = ledger.blocks().to_vec();
        let payload: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        ledger.add_block(payload.clone())?;
        assert_eq!(ledger.len(), before.len() + 1);
        assert_eq!(&ledger.blocks()[..before.len()], before.as_slice());
        assert_eq!(ledger.latest_block()?.data(), payload);
    }
    Ok(())
}

#[test]
fn payment_scenario_at_difficulty_one() -> anyhow::Result<()> {
    let mut ledger = Ledger::new(LedgerConfig::new(1)?);
    let genesis_hash = ledger.latest_block()?.hash().to_string();
    let block = ledger.add_block("payment A→B")?;
    assert_eq!(block.previous_hash(), genesis_hash);
    assert_eq!(block.index(), 1);
    assert!(block.hash().starts_with('0'));
    Ok(())
}

#[test]
fn difficulty_zero_never_searches() -> anyhow::Result<()> {
    let mut ledger = Ledger::new(LedgerConfig::new(0)?);
    ledger.add_block("one")?;
    ledger.add_block("two")?;
    for block in &ledger {
        assert_eq!(block.nonce(), 0);
        assert_eq!(
            block.hash(),
            block_digest(
                block.index(),
                block.timestamp(),
                block.data(),
                block.previous_hash(),
                0
            )
        );
    }
    Ok(())
}

#[test]
fn default_difficulty_mines_four_zeros() -> anyhow::Result<()> {
    let mut ledger = Ledger::new(LedgerConfig::default());
    assert_eq!(ledger.difficulty().zeros(), 4);
    let block = ledger.add_block("reference default")?;
    assert!(block.hash().starts_with("0000"));
    ledger.validate()?;
    Ok(())
}

#[test]
fn fixed_clock_ledgers_are_reproducible() -> anyhow::Result<()> {
    let mut a = fixed_ledger(3, 1_700_000_000.5);
    let mut b = fixed_ledger(3, 1_700_000_000.5);
    assert_eq!(a.latest_block()?.nonce(), 6126);
    a.add_block("same")?;
    b.add_block("same")?;
    assert_eq!(a.blocks(), b.blocks());
    Ok(())
}

#[test]
fn cancelled_append_leaves_chain_unchanged() -> anyhow::Result<()> {
    let mut ledger = fixed_ledger(3, 1_700_000_000.5);
    let before = ledger.blocks().to_vec();

    let err = ledger
        .add_block_until("never mined", |attempts| attempts < 10)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::Mining(MiningError::Cancelled {
            attempts: 10,
            last_nonce: 9
        })
    );
    assert_eq!(ledger.blocks(), before.as_slice());

    let block = ledger.add_block_until("never mined", |_| true)?;
    assert_eq!(block.nonce(), 2742);
    assert_eq!(
        block.hash(),
        "00017144cdd6ad9e6d2635a247f9036b2856386d7fd7385c1dded3ad2a04fd19"
    );
    Ok(())
}

#[test]
fn parallel_strategy_builds_a_valid_chain() -> anyhow::Result<()> {
    let config = LedgerConfig::new(3)?.with_strategy(MiningStrategy::Parallel);
    let mut ledger = Ledger::new(config);
    ledger.add_block("fast")?;
    ledger.add_block("faster")?;
    assert_eq!(ledger.len(), 3);
    ledger.validate()?;
    Ok(())
}

#[test]
fn invalid_difficulty_is_rejected() {
    assert_eq!(
        LedgerConfig::new(65).unwrap_err(),
        LedgerError::InvalidDifficulty {
            requested: 65,
            max: 64
        }
    );
}

#[test]
fn validation_detects_tampering() -> anyhow::Result<()> {
    let ledger = ledger_with_blocks(1, &["alice pays bob 5", "bob pays carol 2"]);
    let json = serde_json::to_string(ledger.blocks())?;

    let forged: Vec<Block> = serde_json::from_str(&json.replace("pays bob 5", "pays bob 500"))?;
    assert_eq!(
        validate_chain(&forged, ledger.difficulty()),
        Err(LedgerError::InvalidBlock {
            index: 1,
            reason: "stored hash does not match contents".to_string()
        })
    );

    let mut reordered: Vec<Block> = serde_json::from_str(&json)?;
    reordered.swap(1, 2);
    assert!(matches!(
        validate_chain(&reordered, ledger.difficulty()),
        Err(LedgerError::InvalidBlock { index: 2, .. })
    ));

    let stricter = Difficulty::new(Difficulty::MAX)?;
    assert!(matches!(
        validate_chain(ledger.blocks(), stricter),
        Err(LedgerError::InvalidBlock { index: 0, .. })
    ));
    Ok(())
}
