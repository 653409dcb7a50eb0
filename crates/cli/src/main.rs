//! Simledger CLI - Account operations and confirmation codes from command line
//!
//! Usage:
//! ```bash
//! simledger simulate --account A100 --first Eric --last Idle --balance 100 \
//!     --op deposit:50 --op withdraw:200 --op interest
//! simledger --interest-rate 1.5 simulate --account A100 --first Eric --last Idle --op interest
//! simledger parse W-A100-20260118093000-105 --timezone ICT+7
//! simledger --json parse W-A100-20260118093000-105
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use simledger_core::{Ledger, LedgerConfig, Timezone};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{parse, simulate, Operation};

/// Simledger - an in-memory bank account that issues confirmation codes
#[derive(Parser)]
#[command(name = "simledger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Ledger configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Interest rate in percent (overrides the config file)
    #[arg(long, global = true)]
    pub interest_rate: Option<Decimal>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an account and apply operations in order
    Simulate {
        /// Account number (opaque, e.g. A100)
        #[arg(long)]
        account: String,
        /// Account holder first name
        #[arg(long)]
        first: String,
        /// Account holder last name
        #[arg(long)]
        last: String,
        /// Account timezone (e.g. UTC, ICT+7, NST-3:30)
        #[arg(long)]
        timezone: Option<Timezone>,
        /// Initial balance
        #[arg(long, default_value = "0")]
        balance: Decimal,
        /// Operation: deposit:<amount>, withdraw:<amount> or interest
        #[arg(long = "op")]
        ops: Vec<Operation>,
    },

    /// Parse a confirmation code
    Parse {
        /// Confirmation code, e.g. W-A100-20260118093000-105
        code: String,
        /// Timezone to render the transaction time in (default UTC)
        #[arg(long)]
        timezone: Option<Timezone>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            account,
            first,
            last,
            timezone,
            balance,
            ops,
        } => {
            let ledger = build_ledger(cli.config.as_deref(), cli.interest_rate)?;
            simulate::run(
                ledger,
                simulate::AccountArgs {
                    account_number: &account,
                    first_name: &first,
                    last_name: &last,
                    timezone,
                    balance,
                },
                &ops,
                cli.json,
            )?;
        }

        Commands::Parse { code, timezone } => {
            parse::run(&code, timezone.as_ref(), cli.json)?;
        }
    }

    Ok(())
}

/// Build the ledger from the optional config file, then apply CLI overrides
fn build_ledger(config: Option<&Path>, interest_rate: Option<Decimal>) -> Result<Ledger> {
    let mut config = match config {
        Some(path) => LedgerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(rate) = interest_rate {
        config.interest_rate = rate;
    }
    tracing::debug!(?config, "Ledger configuration");
    Ledger::from_config(&config).context("Invalid ledger configuration")
}
