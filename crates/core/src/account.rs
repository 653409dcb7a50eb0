//! # Account Module
//!
//! A single in-memory bank account. Each balance-affecting operation issues
//! exactly one confirmation code through the shared [`Ledger`].

use crate::confirmation::{self, TransactionTag};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::money::Amount;
use crate::timezone::Timezone;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// Result of a withdrawal request.
///
/// A refused withdrawal is still a successful call: it carries an `X` code
/// and leaves the balance untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawOutcome {
    Accepted(String),
    Rejected(String),
}

impl WithdrawOutcome {
    pub fn code(&self) -> &str {
        match self {
            WithdrawOutcome::Accepted(code) | WithdrawOutcome::Rejected(code) => code,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            WithdrawOutcome::Accepted(code) | WithdrawOutcome::Rejected(code) => code,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, WithdrawOutcome::Accepted(_))
    }

    pub fn tag(&self) -> TransactionTag {
        match self {
            WithdrawOutcome::Accepted(_) => TransactionTag::Withdraw,
            WithdrawOutcome::Rejected(_) => TransactionTag::Rejected,
        }
    }
}

/// Bank account.
///
/// - `account_number` is assigned by the caller and never validated
/// - names are trimmed and must not be blank
/// - `balance` never goes negative
#[derive(Debug, Clone)]
pub struct Account {
    account_number: String,
    first_name: String,
    last_name: String,
    timezone: Timezone,
    balance: Amount,
    ledger: Arc<Ledger>,
}

impl Account {
    /// Open an account bound to `ledger`.
    ///
    /// `timezone` defaults to [`Timezone::utc`].
    ///
    /// # Errors
    /// [`LedgerError::InvalidField`] for a blank name or a negative
    /// initial balance.
    pub fn new(
        ledger: Arc<Ledger>,
        account_number: &str,
        first_name: &str,
        last_name: &str,
        timezone: Option<Timezone>,
        initial_balance: Decimal,
    ) -> LedgerResult<Self> {
        let first_name = validate_name(first_name, "First name")?;
        let last_name = validate_name(last_name, "Last name")?;
        let balance = Amount::new(initial_balance)
            .map_err(|_| LedgerError::invalid_field("Initial balance", "must be at least 0"))?;

        let account = Self {
            account_number: account_number.to_string(),
            first_name,
            last_name,
            timezone: timezone.unwrap_or_default(),
            balance,
            ledger,
        };
        tracing::info!(
            account = %account.account_number,
            balance = %account.balance,
            timezone = %account.timezone,
            "Account opened"
        );
        Ok(account)
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, value: &str) -> LedgerResult<()> {
        self.first_name = validate_name(value, "First name")?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> LedgerResult<()> {
        self.last_name = validate_name(value, "Last name")?;
        Ok(())
    }

    pub fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    /// Replace the account timezone. Codes already issued are unaffected.
    pub fn set_timezone(&mut self, timezone: Timezone) {
        self.timezone = timezone;
    }

    /// Replace the timezone from its textual form (see [`Timezone`]'s
    /// `FromStr`), reporting [`LedgerError::InvalidTimezone`] on bad input.
    pub fn set_timezone_str(&mut self, value: &str) -> LedgerResult<()> {
        self.timezone = value.parse()?;
        Ok(())
    }

    pub fn balance(&self) -> Decimal {
        self.balance.value()
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Deposit `amount` and return a `D` confirmation code.
    ///
    /// # Errors
    /// [`LedgerError::InvalidAmount`] if `amount` is below 0.01.
    pub fn deposit(&mut self, amount: Decimal) -> LedgerResult<String> {
        let amount = Amount::transaction(amount)?;
        let new_balance = self.balance.checked_add(&amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("Deposit overflows: {}", amount))
        })?;

        let code = self.confirmation_code(TransactionTag::Deposit);
        self.balance = new_balance;
        tracing::info!(
            account = %self.account_number,
            %amount,
            balance = %self.balance,
            "Deposit"
        );
        Ok(code)
    }

    /// Withdraw `amount`.
    ///
    /// If the balance does not cover `amount` the withdrawal is refused:
    /// the balance is unchanged and a [`WithdrawOutcome::Rejected`] with an
    /// `X` code is returned. Either way one transaction id is consumed.
    ///
    /// # Errors
    /// [`LedgerError::InvalidAmount`] if `amount` is below 0.01.
    pub fn withdraw(&mut self, amount: Decimal) -> LedgerResult<WithdrawOutcome> {
        let amount = Amount::transaction(amount)?;

        match self.balance.checked_sub(&amount) {
            Some(new_balance) => {
                let code = self.confirmation_code(TransactionTag::Withdraw);
                self.balance = new_balance;
                tracing::info!(
                    account = %self.account_number,
                    %amount,
                    balance = %self.balance,
                    "Withdrawal"
                );
                Ok(WithdrawOutcome::Accepted(code))
            }
            None => {
                let code = self.confirmation_code(TransactionTag::Rejected);
                tracing::warn!(
                    account = %self.account_number,
                    %amount,
                    balance = %self.balance,
                    "Withdrawal rejected: insufficient funds"
                );
                Ok(WithdrawOutcome::Rejected(code))
            }
        }
    }

    /// Credit `balance * rate / 100` using one snapshot of the ledger rate,
    /// and return an `I` confirmation code. Applies even at a zero rate.
    pub fn pay_interest(&mut self) -> LedgerResult<String> {
        let rate = self.ledger.interest_rate();
        let interest = self
            .balance
            .value()
            .checked_mul(rate)
            .map(|v| v / Decimal::ONE_HUNDRED)
            .and_then(|v| Amount::new(v).ok())
            .ok_or_else(|| {
                LedgerError::InvalidAmount(format!(
                    "Interest on {} at {}% overflows",
                    self.balance, rate
                ))
            })?;
        let new_balance = self.balance.checked_add(&interest).ok_or_else(|| {
            LedgerError::InvalidAmount(format!("Interest {} overflows balance", interest))
        })?;

        let code = self.confirmation_code(TransactionTag::Interest);
        self.balance = new_balance;
        tracing::info!(
            account = %self.account_number,
            %rate,
            %interest,
            balance = %self.balance,
            "Interest paid"
        );
        Ok(code)
    }

    fn confirmation_code(&self, tag: TransactionTag) -> String {
        confirmation::generate(&self.ledger, tag, &self.account_number)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} ({}, balance: {}, timezone: {})",
            self.account_number,
            self.full_name(),
            self.balance,
            self.timezone
        )
    }
}

fn validate_name(value: &str, field: &str) -> LedgerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::invalid_field(field, "cannot be empty"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirmation::parse;
    use rust_decimal_macros::dec;

    fn open(ledger: &Arc<Ledger>, balance: Decimal) -> Account {
        Account::new(Arc::clone(ledger), "A100", "FIRST", "LAST", None, balance).unwrap()
    }

    #[test]
    fn test_create_account() {
        let ledger = Arc::new(Ledger::new());
        let tz = Timezone::new("TZ", 1, 30).unwrap();
        let account =
            Account::new(ledger, "A100", "FIRST", "LAST", Some(tz.clone()), dec!(100.0)).unwrap();

        assert_eq!(account.account_number(), "A100");
        assert_eq!(account.first_name(), "FIRST");
        assert_eq!(account.last_name(), "LAST");
        assert_eq!(account.full_name(), "FIRST LAST");
        assert_eq!(account.timezone(), &tz);
        assert_eq!(account.balance(), dec!(100.0));
    }

    #[test]
    fn test_create_account_defaults() {
        let ledger = Arc::new(Ledger::new());
        let account = open(&ledger, Decimal::ZERO);
        assert_eq!(account.timezone(), &Timezone::utc());
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_names_are_trimmed() {
        let ledger = Arc::new(Ledger::new());
        let account = Account::new(ledger, "A1", "  Eric ", " Idle", None, Decimal::ZERO).unwrap();
        assert_eq!(account.full_name(), "Eric Idle");
    }

    #[test]
    fn test_create_account_blank_names() {
        let ledger = Arc::new(Ledger::new());
        let err = Account::new(Arc::clone(&ledger), "A1", " ", "LAST", None, Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidField(_)));

        let err = Account::new(ledger, "A1", "FIRST", "", None, Decimal::ZERO).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidField(_)));
    }

    #[test]
    fn test_create_account_negative_balance() {
        let ledger = Arc::new(Ledger::new());
        let err = Account::new(ledger, "A1", "FIRST", "LAST", None, dec!(-100)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidField(_)));
    }

    #[test]
    fn test_rename() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, Decimal::ZERO);
        account.set_first_name(" Graham ").unwrap();
        assert_eq!(account.first_name(), "Graham");
        assert!(account.set_last_name("   ").is_err());
        assert_eq!(account.last_name(), "LAST");
    }

    #[test]
    fn test_deposit() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100));

        let code = account.deposit(dec!(0.01)).unwrap();
        assert!(code.starts_with("D-A100-"));
        assert_eq!(account.balance(), dec!(100.01));
    }

    #[test]
    fn test_deposit_below_minimum() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100));

        for amount in [Decimal::ZERO, dec!(0.009), dec!(-10)] {
            let err = account.deposit(amount).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
        assert_eq!(account.balance(), dec!(100));
        // invalid input never reaches the counter
        assert_eq!(ledger.peek_transaction_id(), 100);
    }

    #[test]
    fn test_account_withdraw_ok() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100.0));

        let outcome = account.withdraw(dec!(20)).unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(outcome.tag(), TransactionTag::Withdraw);
        assert!(outcome.code().starts_with("W-"));
        assert_eq!(account.balance(), dec!(80.0));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(50));

        let outcome = account.withdraw(dec!(50)).unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_account_withdraw_overdraw() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100.0));

        let outcome = account.withdraw(dec!(200)).unwrap();
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.tag(), TransactionTag::Rejected);
        assert!(outcome.code().starts_with("X-"));
        assert_eq!(account.balance(), dec!(100.0));
        // rejected withdrawals still consume a transaction id
        assert_eq!(ledger.peek_transaction_id(), 101);
    }

    #[test]
    fn test_withdraw_below_minimum() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100));
        assert!(matches!(
            account.withdraw(dec!(0.001)),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_pay_interest() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(200));

        let code = account.pay_interest().unwrap();
        assert!(code.starts_with("I-A100-"));
        // default rate 0.5%
        assert_eq!(account.balance(), dec!(201));
    }

    #[test]
    fn test_pay_interest_zero_rate_still_issues_code() {
        let ledger = Arc::new(Ledger::new());
        ledger.set_interest_rate(Decimal::ZERO).unwrap();
        let mut account = open(&ledger, dec!(200));

        let code = account.pay_interest().unwrap();
        assert!(code.starts_with("I-"));
        assert_eq!(account.balance(), dec!(200));
        assert_eq!(ledger.peek_transaction_id(), 101);
    }

    #[test]
    fn test_interest_rate_shared_between_accounts() {
        let ledger = Arc::new(Ledger::new());
        let mut a = open(&ledger, dec!(100));
        let mut b = Account::new(Arc::clone(&ledger), "B200", "X", "Y", None, dec!(1000)).unwrap();

        ledger.set_interest_rate(dec!(10)).unwrap();
        a.pay_interest().unwrap();
        b.pay_interest().unwrap();

        assert_eq!(a.balance(), dec!(110));
        assert_eq!(b.balance(), dec!(1100));
    }

    #[test]
    fn test_set_timezone() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(10));

        let code = account.deposit(dec!(1)).unwrap();
        let tz = Timezone::new("ICT", 7, 0).unwrap();
        account.set_timezone(tz.clone());
        assert_eq!(account.timezone(), &tz);

        // codes already issued carry UTC and are unaffected
        let conf = parse(&code, None).unwrap();
        assert!(conf.time.ends_with("(UTC)"));
    }

    #[test]
    fn test_set_timezone_str() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(10));

        account.set_timezone_str("NST-3:30").unwrap();
        assert_eq!(account.timezone(), &Timezone::new("NST", -3, -30).unwrap());

        let err = account.set_timezone_str("BAD+20").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTimezone(_)));
        assert_eq!(account.timezone().name(), "NST");
    }

    #[test]
    fn test_each_operation_ticks_counter_once() {
        let ledger = Arc::new(Ledger::new());
        let mut account = open(&ledger, dec!(100));

        let ids: Vec<String> = vec![
            account.deposit(dec!(10)).unwrap(),
            account.withdraw(dec!(500)).unwrap().into_code(),
            account.withdraw(dec!(5)).unwrap().into_code(),
            account.pay_interest().unwrap(),
        ]
        .iter()
        .map(|code| parse(code, None).unwrap().transaction_id)
        .collect();

        assert_eq!(ids, ["100", "101", "102", "103"]);
    }
}
