//! # Error Module
//!
//! Domain errors for Simledger using thiserror.

use thiserror::Error;

/// Core ledger errors.
///
/// Every variant is a local, synchronous validation failure. A refused
/// withdrawal is a business outcome, not an error, and has no variant here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // === Validation errors ===
    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid interest rate: {0}")]
    InvalidRate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    // === Codec errors ===
    #[error("Malformed confirmation code: {0}")]
    MalformedCode(String),

    // === Configuration errors ===
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Create an invalid field error for the named field
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        Self::InvalidField(format!("{} {}", field, reason))
    }

    /// Check whether the error was caused by a rejected input value
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidField(_)
                | LedgerError::InvalidAmount(_)
                | LedgerError::InvalidRate(_)
                | LedgerError::InvalidTimezone(_)
        )
    }

    pub fn is_malformed_code(&self) -> bool {
        matches!(self, LedgerError::MalformedCode(_))
    }
}
