use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledger_core::{AddressProvider, Ledger, LedgerConfig, MiningStrategy};
use ledger_keys::KeyPairAddressProvider;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Proof-of-work ledger simulator")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a ledger, mine one block per payload and print the chain
    Simulate {
        /// Leading zero hex digits required in every block hash
        #[arg(long, default_value_t = ledger_core::constants::DEFAULT_DIFFICULTY)]
        difficulty: u32,
        /// Block payload; repeat for more blocks. Defaults to one payment
        /// between two freshly generated addresses.
        #[arg(long = "block")]
        blocks: Vec<String>,
        /// Search nonces on all cores (finds a valid nonce, not the smallest)
        #[arg(long)]
        parallel: bool,
        /// Print the chain as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Generate secp256k1 key pairs and print their addresses
    Address {
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .pretty()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate {
            difficulty,
            blocks,
            parallel,
            json,
        } => simulate(difficulty, blocks, parallel, json),
        Command::Address { count } => {
            let provider = KeyPairAddressProvider;
            for _ in 0..count {
                println!("{}", provider.address()?);
            }
            Ok(())
        }
    }
}

fn simulate(difficulty: u32, mut payloads: Vec<String>, parallel: bool, json: bool) -> Result<()> {
    let strategy = if parallel {
        MiningStrategy::Parallel
    } else {
        MiningStrategy::Sequential
    };
    let config = LedgerConfig::new(difficulty)?.with_strategy(strategy);

    if payloads.is_empty() {
        let provider = KeyPairAddressProvider;
        let from = provider.address()?;
        let to = provider.address()?;
        payloads.push(format!("payment {from}→{to}"));
    }

    info!(%difficulty, blocks = payloads.len() + 1, "building ledger");
    let mut ledger = Ledger::new(config);
    for payload in payloads {
        ledger.add_block(payload)?;
    }
    ledger.validate().context("mined chain failed validation")?;

    if json {
        println!("{}", serde_json::to_string_pretty(ledger.blocks())?);
        return Ok(());
    }
    for block in &ledger {
        println!("block {}", block.index());
        println!("  timestamp: {}", block.timestamp());
        println!("  data:      {}", block.data());
        println!("  previous:  {}", block.previous_hash());
        println!("  nonce:     {}", block.nonce());
        println!("  hash:      {}", block.hash());
    }
    Ok(())
}
