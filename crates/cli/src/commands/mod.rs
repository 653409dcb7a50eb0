//! Subcommand handlers

pub mod parse;
pub mod simulate;

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// One step of a simulated session, given as `--op`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit(Decimal),
    Withdraw(Decimal),
    Interest,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, amount) = match s.split_once(':') {
            Some((kind, amount)) => (kind.trim(), Some(amount.trim())),
            None => (s.trim(), None),
        };

        let parse_amount = |raw: Option<&str>| -> Result<Decimal, String> {
            let raw = raw.ok_or_else(|| format!("'{}' needs an amount, e.g. {}:100", kind, kind))?;
            Decimal::from_str(raw).map_err(|e| format!("invalid amount '{}': {}", raw, e))
        };

        match kind.to_lowercase().as_str() {
            "deposit" | "d" => Ok(Operation::Deposit(parse_amount(amount)?)),
            "withdraw" | "w" => Ok(Operation::Withdraw(parse_amount(amount)?)),
            "interest" | "i" if amount.is_none() => Ok(Operation::Interest),
            "interest" | "i" => Err("'interest' takes no amount".to_string()),
            other => Err(format!(
                "unknown operation '{}' (expected deposit:<amount>, withdraw:<amount> or interest)",
                other
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit(amount) => write!(f, "deposit {}", amount),
            Operation::Withdraw(amount) => write!(f, "withdraw {}", amount),
            Operation::Interest => write!(f, "interest"),
        }
    }
}
