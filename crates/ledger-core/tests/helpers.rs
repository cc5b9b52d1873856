use ledger_core::{FixedClock, Ledger, LedgerConfig};

pub fn fixed_ledger(difficulty: u32, secs: f64) -> Ledger<FixedClock> {
    let config = LedgerConfig::new(difficulty).expect("valid difficulty");
    Ledger::with_clock(config, FixedClock::at(secs))
}

pub fn ledger_with_blocks(difficulty: u32, payloads: &[&str]) -> Ledger {
    let config = LedgerConfig::new(difficulty).expect("valid difficulty");
    let mut ledger = Ledger::new(config);
    for payload in payloads {
        ledger.add_block(*payload).expect("append");
    }
    ledger
}
