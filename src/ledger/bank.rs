use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;

use crate::config;
use crate::errors::LedgerError;

pub(crate) fn is_uppercase_hex(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

/// Four uppercase hexadecimal characters naming a bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BankCode(String);

impl BankCode {
    pub fn new(code: impl Into<String>) -> Result<Self, LedgerError> {
        let code = code.into();
        if code.len() != 4 {
            return Err(LedgerError::format(
                "bank code",
                &code,
                format!("expected 4 characters, got {}", code.len()),
            ));
        }
        if !is_uppercase_hex(&code) {
            return Err(LedgerError::format(
                "bank code",
                &code,
                "expected uppercase hexadecimal characters",
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BankCode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Fixed UTC offset written `UTC+HH:MM` or `UTC-HH:MM`.
///
/// The minutes follow the sign of the hour field, so `UTC-05:30` is five and
/// a half hours behind UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankZone {
    offset: FixedOffset,
}

impl BankZone {
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl fmt::Display for BankZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.offset.local_minus_utc();
        let sign = if total < 0 { '-' } else { '+' };
        let total = total.abs();
        write!(f, "UTC{}{:02}:{:02}", sign, total / 3600, (total % 3600) / 60)
    }
}

impl FromStr for BankZone {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("UTC").ok_or_else(|| {
            LedgerError::format("timezone", s, "expected the `UTC+HH:MM` format")
        })?;
        if rest.contains("UTC") {
            return Err(LedgerError::format(
                "timezone",
                s,
                "expected exactly one `UTC` marker",
            ));
        }
        let (hh, mm) = rest.split_once(':').ok_or_else(|| {
            LedgerError::format("timezone", s, "expected `:`-separated hours and minutes")
        })?;
        let hours: i32 = hh
            .parse()
            .map_err(|_| LedgerError::format("timezone", s, "hours are not a number"))?;
        if !(-24..=24).contains(&hours) {
            return Err(LedgerError::format(
                "timezone",
                s,
                "hours must be between -24 and 24",
            ));
        }
        let minutes: i32 = mm
            .parse()
            .map_err(|_| LedgerError::format("timezone", s, "minutes are not a number"))?;
        if !(0..60).contains(&minutes) {
            return Err(LedgerError::format(
                "timezone",
                s,
                "minutes must be between 00 and 59",
            ));
        }
        let minutes = if hh.starts_with('-') { -minutes } else { minutes };
        let offset = FixedOffset::east_opt(hours * 3600 + minutes * 60).ok_or_else(|| {
            LedgerError::format("timezone", s, "offset is beyond one day from UTC")
        })?;
        Ok(Self { offset })
    }
}

/// A bank identity: code, zone, and a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    code: BankCode,
    timezone: BankZone,
    name: String,
}

impl Bank {
    pub fn new(code: BankCode, timezone: BankZone, name: Option<String>) -> Self {
        Self {
            code,
            timezone,
            name: name.unwrap_or_else(|| config::UNKNOWN_BANK_NAME.to_string()),
        }
    }

    pub fn code(&self) -> &BankCode {
        &self.code
    }

    pub fn timezone(&self) -> BankZone {
        self.timezone
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
