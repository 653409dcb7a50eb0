//! Simledger Core - in-memory bank account with confirmation codes
//!
//! This crate contains:
//! - `Timezone`: validated, named UTC offset
//! - `Amount`: non-negative decimal wrapper for balances
//! - `Ledger`: shared transaction counter and interest rate
//! - `Account`: deposit / withdraw / pay_interest, each issuing a code
//! - `confirmation`: format, generate and parse confirmation codes
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use simledger_core::{parse, Account, Ledger, TransactionTag};
//!
//! let ledger = Arc::new(Ledger::new());
//! let mut account =
//!     Account::new(ledger, "A100", "Eric", "Idle", None, Decimal::new(100, 0)).unwrap();
//!
//! let outcome = account.withdraw(Decimal::new(200, 0)).unwrap();
//! assert!(!outcome.is_accepted());
//! assert_eq!(account.balance(), Decimal::new(100, 0));
//!
//! let conf = parse(outcome.code(), None).unwrap();
//! assert_eq!(conf.tag(), Some(TransactionTag::Rejected));
//! assert_eq!(conf.account_number, "A100");
//! ```

pub mod account;
pub mod confirmation;
pub mod error;
pub mod ledger;
pub mod money;
pub mod timezone;

pub use account::{Account, WithdrawOutcome};
pub use confirmation::{format_code, generate, parse, Confirmation, TransactionTag};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerConfig, DEFAULT_INTEREST_RATE, TRANSACTION_ID_SEED};
pub use money::{Amount, MIN_TRANSACTION_AMOUNT};
pub use timezone::Timezone;
