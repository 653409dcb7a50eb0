//! # Ledger Module
//!
//! Process-wide state shared by every account opened against the same
//! ledger handle:
//! - the transaction counter (seeded at [`TRANSACTION_ID_SEED`], atomic,
//!   never reset or rolled back)
//! - the interest rate in percent (read once per interest payment)
//!
//! Accounts hold an `Arc<Ledger>`; nothing here is a global.

use crate::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// First transaction id handed out by a fresh ledger
pub const TRANSACTION_ID_SEED: u64 = 100;

/// Interest rate (percent) used when no configuration overrides it (0.5)
pub const DEFAULT_INTEREST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Ledger configuration.
///
/// ```json
/// { "interest_rate": "0.5" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Interest rate in percent, must be >= 0
    pub interest_rate: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            interest_rate: DEFAULT_INTEREST_RATE,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        validate_rate(self.interest_rate).map(|_| ())
    }
}

/// Shared transaction counter and interest rate.
///
/// `Ledger` is `Send + Sync`; share it between accounts and threads with
/// `Arc`.
#[derive(Debug)]
pub struct Ledger {
    /// Next transaction id to hand out
    transaction_counter: AtomicU64,
    /// Interest rate in percent
    interest_rate: RwLock<Decimal>,
}

impl Ledger {
    /// Create a ledger with the default interest rate
    pub fn new() -> Self {
        Self {
            transaction_counter: AtomicU64::new(TRANSACTION_ID_SEED),
            interest_rate: RwLock::new(DEFAULT_INTEREST_RATE),
        }
    }

    /// Create a ledger from a validated configuration
    pub fn from_config(config: &LedgerConfig) -> LedgerResult<Self> {
        let rate = validate_rate(config.interest_rate)?;
        Ok(Self {
            transaction_counter: AtomicU64::new(TRANSACTION_ID_SEED),
            interest_rate: RwLock::new(rate),
        })
    }

    /// Consume one transaction id.
    ///
    /// Concurrent callers never observe the same value.
    pub fn next_transaction_id(&self) -> u64 {
        self.transaction_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// The id the next issued code will carry, without consuming it
    pub fn peek_transaction_id(&self) -> u64 {
        self.transaction_counter.load(Ordering::SeqCst)
    }

    /// Snapshot of the current interest rate
    pub fn interest_rate(&self) -> Decimal {
        *self
            .interest_rate
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the interest rate for every account bound to this ledger.
    ///
    /// Interest computations already holding a snapshot are unaffected.
    pub fn set_interest_rate(&self, value: Decimal) -> LedgerResult<()> {
        let value = validate_rate(value)?;
        let mut rate = self
            .interest_rate
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let old = *rate;
        tracing::info!(%old, new = %value, "Interest rate changed");
        *rate = value;
        Ok(())
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_rate(value: Decimal) -> LedgerResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(LedgerError::InvalidRate(format!(
            "Interest rate cannot be negative: {}",
            value
        )));
    }
    Ok(value)
}
