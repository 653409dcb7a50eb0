//! # Money Module
//!
//! Non-negative decimal wrapper for balances and transaction amounts.
//!
//! Every balance in Simledger MUST be non-negative; this is enforced at the
//! type level. Transaction amounts additionally have a floor of
//! [`MIN_TRANSACTION_AMOUNT`].

use crate::error::{LedgerError, LedgerResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest amount accepted by deposit and withdraw (0.01)
pub const MIN_TRANSACTION_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A non-negative decimal amount.
///
/// # Invariant
/// The inner value is always >= 0. This is enforced by the constructor.
///
/// # Example
/// ```
/// use simledger_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(100, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
///
/// // Negative amounts are rejected
/// assert!(Amount::new(Decimal::new(-100, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Amount from a Decimal.
    ///
    /// Returns [`LedgerError::InvalidAmount`] if the value is negative.
    pub fn new(value: Decimal) -> LedgerResult<Self> {
        if value < Decimal::ZERO {
            Err(LedgerError::InvalidAmount(format!(
                "Amount cannot be negative: {}",
                value
            )))
        } else {
            Ok(Self(value))
        }
    }

    /// Create an amount usable for a deposit or withdrawal.
    ///
    /// Returns [`LedgerError::InvalidAmount`] below [`MIN_TRANSACTION_AMOUNT`].
    pub fn transaction(value: Decimal) -> LedgerResult<Self> {
        if value < MIN_TRANSACTION_AMOUNT {
            return Err(LedgerError::InvalidAmount(format!(
                "Value must be at least {}, got {}",
                MIN_TRANSACTION_AMOUNT, value
            )));
        }
        Ok(Self(value))
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition - None on overflow
    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - None if the result would be negative
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        let result = self.0.checked_sub(other.0)?;
        if result < Decimal::ZERO {
            None
        } else {
            Some(Amount(result))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Parses a decimal string; non-numeric text is an `InvalidAmount`.
impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| LedgerError::InvalidAmount(format!("Not a number: {:?}", s)))?;
        Self::new(value)
    }
}
