//! # Confirmation Module
//!
//! Confirmation codes identify a single transaction:
//!
//! ```text
//! <tag>-<account_number>-<YYYYMMDDhhmmss>-<transaction_id>
//! ```
//!
//! The timestamp is always UTC at second precision. Parsing is a pure
//! function of the code string and the caller's preferred timezone; it never
//! touches an account or the ledger.

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::timezone::Timezone;
use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format of the timestamp field
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// Kind of transaction encoded in a confirmation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTag {
    Deposit,
    Withdraw,
    Interest,
    /// Withdrawal refused for insufficient funds
    Rejected,
}

impl TransactionTag {
    /// Single-letter code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            TransactionTag::Deposit => "D",
            TransactionTag::Withdraw => "W",
            TransactionTag::Interest => "I",
            TransactionTag::Rejected => "X",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(TransactionTag::Deposit),
            "W" => Some(TransactionTag::Withdraw),
            "I" => Some(TransactionTag::Interest),
            "X" => Some(TransactionTag::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionTag::Deposit => "deposit",
            TransactionTag::Withdraw => "withdraw",
            TransactionTag::Interest => "interest",
            TransactionTag::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TransactionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields recovered from a confirmation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub account_number: String,
    /// Raw tag field, e.g. `"W"`
    pub transaction_code: String,
    /// Counter value at issuance, as written in the code
    pub transaction_id: String,
    /// Issuance instant, second precision
    pub time_utc: DateTime<Utc>,
    /// Issuance instant in the preferred timezone, e.g.
    /// `"2026-10-18 19:05:00 (ICT)"`
    pub time: String,
}

impl Confirmation {
    /// Known tag for `transaction_code`, if any
    pub fn tag(&self) -> Option<TransactionTag> {
        TransactionTag::from_code(&self.transaction_code)
    }

    /// `time_utc` as ISO-8601 without offset suffix, e.g. `2026-10-18T12:05:00`
    pub fn time_utc_iso(&self) -> String {
        self.time_utc.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} on {} at {}",
            self.transaction_id, self.transaction_code, self.account_number, self.time
        )
    }
}

/// Format a confirmation code from its parts.
///
/// Sub-second precision in `at` is dropped.
pub fn format_code(
    tag: TransactionTag,
    account_number: &str,
    at: DateTime<Utc>,
    transaction_id: u64,
) -> String {
    format!(
        "{}-{}-{}-{}",
        tag.code(),
        account_number,
        at.format(TIMESTAMP_FORMAT),
        transaction_id
    )
}

/// Issue a new confirmation code stamped with the current UTC time.
///
/// Consumes one transaction id from `ledger`.
pub fn generate(ledger: &Ledger, tag: TransactionTag, account_number: &str) -> String {
    let now = Utc::now().trunc_subsecs(0);
    let transaction_id = ledger.next_transaction_id();
    let code = format_code(tag, account_number, now, transaction_id);
    tracing::debug!(%code, tag = tag.as_str(), transaction_id, "Issued confirmation code");
    code
}

/// Parse a confirmation code.
///
/// `time` in the result is rendered with `preferred_timezone` (UTC when
/// `None`) applied as a fixed offset to the UTC instant.
///
/// # Errors
/// [`LedgerError::MalformedCode`] unless the code has exactly four
/// hyphen-separated fields and a valid `YYYYMMDDhhmmss` timestamp.
///
/// # Examples
/// ```
/// use simledger_core::{parse, Timezone};
///
/// let tz = Timezone::new("ICT", 7, 0).unwrap();
/// let conf = parse("W-A100-20260118093000-105", Some(&tz)).unwrap();
/// assert_eq!(conf.transaction_code, "W");
/// assert_eq!(conf.time_utc_iso(), "2026-01-18T09:30:00");
/// assert_eq!(conf.time, "2026-01-18 16:30:00 (ICT)");
/// ```
pub fn parse(code: &str, preferred_timezone: Option<&Timezone>) -> LedgerResult<Confirmation> {
    let parts: Vec<&str> = code.split('-').collect();
    let [transaction_code, account_number, raw_time, transaction_id] = parts[..] else {
        return Err(LedgerError::MalformedCode(format!(
            "expected 4 fields, got {}: {:?}",
            parts.len(),
            code
        )));
    };

    let time_utc = parse_timestamp(raw_time)?;

    let utc = Timezone::utc();
    let tz = preferred_timezone.unwrap_or(&utc);
    let local = time_utc.with_timezone(&tz.fixed_offset());
    let time = format!("{} ({})", local.format("%Y-%m-%d %H:%M:%S"), tz.name());

    Ok(Confirmation {
        account_number: account_number.to_string(),
        transaction_code: transaction_code.to_string(),
        transaction_id: transaction_id.to_string(),
        time_utc,
        time,
    })
}

fn parse_timestamp(raw: &str) -> LedgerResult<DateTime<Utc>> {
    if raw.len() != TIMESTAMP_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::MalformedCode(format!(
            "timestamp must be 14 digits (YYYYMMDDhhmmss), got {:?}",
            raw
        )));
    }

    // chrono's %S admits a leap second (60); wall-clock seconds stop at 59.
    if &raw[12..] > "59" {
        return Err(LedgerError::MalformedCode(format!(
            "invalid timestamp {:?}: second out of range",
            raw
        )));
    }

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| LedgerError::MalformedCode(format!("invalid timestamp {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_tag_codes() {
        assert_eq!(TransactionTag::Deposit.code(), "D");
        assert_eq!(TransactionTag::Withdraw.code(), "W");
        assert_eq!(TransactionTag::Interest.code(), "I");
        assert_eq!(TransactionTag::Rejected.code(), "X");

        for tag in [
            TransactionTag::Deposit,
            TransactionTag::Withdraw,
            TransactionTag::Interest,
            TransactionTag::Rejected,
        ] {
            assert_eq!(TransactionTag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(TransactionTag::from_code("Z"), None);
        assert_eq!(TransactionTag::from_code("d"), None);
    }

    #[test]
    fn test_format_code() {
        let code = format_code(TransactionTag::Deposit, "A100", at(2026, 1, 5, 8, 3, 9), 142);
        assert_eq!(code, "D-A100-20260105080309-142");
    }

    #[test]
    fn test_parse_default_timezone_is_utc() {
        let conf = parse("D-A100-20260105080309-142", None).unwrap();
        assert_eq!(conf.account_number, "A100");
        assert_eq!(conf.transaction_code, "D");
        assert_eq!(conf.tag(), Some(TransactionTag::Deposit));
        assert_eq!(conf.transaction_id, "142");
        assert_eq!(conf.time_utc, at(2026, 1, 5, 8, 3, 9));
        assert_eq!(conf.time_utc_iso(), "2026-01-05T08:03:09");
        assert_eq!(conf.time, "2026-01-05 08:03:09 (UTC)");
    }

    #[test]
    fn test_parse_negative_offset_crosses_midnight() {
        let tz = Timezone::new("MST", -7, 0).unwrap();
        let conf = parse("I-A100-20260101030000-7", Some(&tz)).unwrap();
        assert_eq!(conf.time, "2025-12-31 20:00:00 (MST)");
        assert_eq!(conf.time_utc_iso(), "2026-01-01T03:00:00");
    }

    #[test]
    fn test_parse_minutes_offset() {
        let tz = Timezone::new("NST", -3, -30).unwrap();
        let conf = parse("X-B7-20260615120000-300", Some(&tz)).unwrap();
        assert_eq!(conf.time, "2026-06-15 08:30:00 (NST)");
        assert_eq!(conf.tag(), Some(TransactionTag::Rejected));
    }

    #[test]
    fn test_parse_unknown_tag_kept_verbatim() {
        let conf = parse("Q-A100-20260105080309-1", None).unwrap();
        assert_eq!(conf.transaction_code, "Q");
        assert_eq!(conf.tag(), None);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        for code in [
            "",
            "D",
            "D-A100-20260105080309",
            "D-A-100-20260105080309-142",
            "D-A100-20260105080309-142-extra",
        ] {
            let err = parse(code, None).unwrap_err();
            assert!(err.is_malformed_code(), "{:?} should be malformed", code);
        }
    }

    #[test]
    fn test_parse_bad_timestamp() {
        for code in [
            "D-A100-2026010508030-142",
            "D-A100-202601050803099-142",
            "D-A100-2026O105080309-142",
            "D-A100-20261305080309-142",
            "D-A100-20260230080309-142",
            "D-A100-20260105250309-142",
            "D-A100-+2026010508030-142",
            "D-A100-20260105080360-142",
            "D-A100-20260105080399-142",
        ] {
            let err = parse(code, None).unwrap_err();
            assert!(
                matches!(err, LedgerError::MalformedCode(_)),
                "{:?} should be malformed",
                code
            );
        }
    }

    #[test]
    fn test_generate_consumes_counter() {
        let ledger = Ledger::new();
        let first = generate(&ledger, TransactionTag::Deposit, "A100");
        let second = generate(&ledger, TransactionTag::Withdraw, "B200");

        assert!(first.starts_with("D-A100-"));
        assert!(first.ends_with("-100"));
        assert!(second.starts_with("W-B200-"));
        assert!(second.ends_with("-101"));
        assert_eq!(ledger.peek_transaction_id(), 102);
    }

    #[test]
    fn test_generate_parse_roundtrip() {
        let ledger = Ledger::new();
        let tz = Timezone::new("TZ", 1, 30).unwrap();

        let before = Utc::now().trunc_subsecs(0);
        let code = generate(&ledger, TransactionTag::Interest, "A100");
        let after = Utc::now();

        let conf = parse(&code, Some(&tz)).unwrap();
        assert_eq!(conf.account_number, "A100");
        assert_eq!(conf.tag(), Some(TransactionTag::Interest));
        assert_eq!(conf.transaction_id, "100");
        assert!(conf.time_utc >= before && conf.time_utc <= after);

        let local = conf.time_utc + tz.offset();
        assert_eq!(
            conf.time,
            format!("{} (TZ)", local.format("%Y-%m-%d %H:%M:%S"))
        );
    }
}
