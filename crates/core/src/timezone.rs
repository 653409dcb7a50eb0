//! # Timezone Module
//!
//! Immutable, named UTC offset used to render transaction timestamps.
//! Offsets are validated at construction: minutes in `-59..=59` and the
//! combined offset within `[-12:00, +14:00]`.

use crate::error::{LedgerError, LedgerResult};
use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_OFFSET_MINUTES: i64 = -12 * 60;
const MAX_OFFSET_MINUTES: i64 = 14 * 60;

/// A named offset from UTC.
///
/// Equality is structural: two timezones are equal only when the name and
/// both offset components match. `Timezone("A", 1, -30)` and
/// `Timezone("A", 0, 30)` describe the same duration but are not equal.
///
/// # Examples
/// ```
/// use simledger_core::Timezone;
///
/// let tz = Timezone::new("ICT", 7, 0).unwrap();
/// assert_eq!(tz.offset(), chrono::Duration::hours(7));
///
/// assert!(Timezone::new("  ", 0, 0).is_err());
/// assert!(Timezone::new("FAR", 15, 0).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TimezoneSpec", into = "TimezoneSpec")]
pub struct Timezone {
    name: String,
    hours_offset: i32,
    minutes_offset: i32,
    fixed: FixedOffset,
}

/// Serialized shape of a [`Timezone`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneSpec {
    pub name: String,
    pub hours_offset: i32,
    #[serde(default)]
    pub minutes_offset: i32,
}

impl Timezone {
    /// Create a new Timezone.
    ///
    /// The name is trimmed; blank names and out-of-range offsets are
    /// rejected with [`LedgerError::InvalidTimezone`].
    pub fn new(name: &str, hours_offset: i32, minutes_offset: i32) -> LedgerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidTimezone(
                "Timezone name cannot be empty".to_string(),
            ));
        }

        if !(-59..=59).contains(&minutes_offset) {
            return Err(LedgerError::InvalidTimezone(format!(
                "Minute offset must be between -59 and 59 (inclusive), got {}",
                minutes_offset
            )));
        }

        let total_minutes = i64::from(hours_offset) * 60 + i64::from(minutes_offset);
        if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&total_minutes) {
            return Err(LedgerError::InvalidTimezone(format!(
                "Offset must be between -12:00 and +14:00, got {}",
                format_offset(total_minutes)
            )));
        }

        // Bounds checked above, so the offset always fits in a FixedOffset.
        let fixed = FixedOffset::east_opt((total_minutes * 60) as i32).ok_or_else(|| {
            LedgerError::InvalidTimezone(format!("Unrepresentable offset {}", total_minutes))
        })?;

        Ok(Self {
            name: name.to_string(),
            hours_offset,
            minutes_offset,
            fixed,
        })
    }

    /// The fixed `UTC+0` timezone used when none is supplied
    pub fn utc() -> Self {
        Self {
            name: "UTC".to_string(),
            hours_offset: 0,
            minutes_offset: 0,
            fixed: Utc.fix(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours_offset(&self) -> i32 {
        self.hours_offset
    }

    pub fn minutes_offset(&self) -> i32 {
        self.minutes_offset
    }

    /// Signed duration represented by this timezone
    pub fn offset(&self) -> Duration {
        Duration::minutes(self.total_minutes())
    }

    /// The offset as a chrono [`FixedOffset`], for rendering instants
    pub fn fixed_offset(&self) -> FixedOffset {
        self.fixed
    }

    fn total_minutes(&self) -> i64 {
        i64::from(self.hours_offset) * 60 + i64::from(self.minutes_offset)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl PartialEq for Timezone {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.hours_offset == other.hours_offset
            && self.minutes_offset == other.minutes_offset
    }
}

impl Eq for Timezone {}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_offset(self.total_minutes()))
    }
}

impl TryFrom<TimezoneSpec> for Timezone {
    type Error = LedgerError;

    fn try_from(spec: TimezoneSpec) -> Result<Self, Self::Error> {
        Self::new(&spec.name, spec.hours_offset, spec.minutes_offset)
    }
}

impl From<Timezone> for TimezoneSpec {
    fn from(tz: Timezone) -> Self {
        Self {
            name: tz.name,
            hours_offset: tz.hours_offset,
            minutes_offset: tz.minutes_offset,
        }
    }
}

/// Parse `NAME`, `NAME+H`, `NAME-H:MM` or `NAME+HH:MM`.
///
/// The sign applies to both components, so `NST-3:30` is
/// `Timezone("NST", -3, -30)`.
impl FromStr for Timezone {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match split_offset_suffix(s)? {
            Some((name, sign, hours, minutes)) => Self::new(name, sign * hours, sign * minutes),
            None => Self::new(s, 0, 0),
        }
    }
}

/// Split a trailing `+H[:MM]` / `-H[:MM]` suffix off a timezone string.
///
/// A sign followed by a digit always starts an offset; `Ok(None)` means the
/// string carries no offset at all.
fn split_offset_suffix(s: &str) -> LedgerResult<Option<(&str, i32, i32, i32)>> {
    let Some(idx) = s.rfind(['+', '-']) else {
        return Ok(None);
    };
    let (name, suffix) = s.split_at(idx);
    let body = &suffix[1..];
    if !body.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }
    let sign = if suffix.starts_with('-') { -1 } else { 1 };

    let invalid = || {
        LedgerError::InvalidTimezone(format!(
            "Offset must be H, HH, H:MM or HH:MM, got {:?}",
            suffix
        ))
    };

    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (body, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if hours.is_empty() || hours.len() > 2 || !all_digits(hours) {
        return Err(invalid());
    }
    if let Some(m) = minutes {
        if m.len() != 2 || !all_digits(m) {
            return Err(invalid());
        }
    }

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = match minutes {
        Some(m) => m.parse().map_err(|_| invalid())?,
        None => 0,
    };
    Ok(Some((name, sign, hours, minutes)))
}

fn format_offset(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let abs = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}
