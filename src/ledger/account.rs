use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

use super::bank::{is_uppercase_hex, BankCode};

/// Account identifier: a bank code followed by 28 account-local hex characters.
///
/// Input may carry dashes anywhere; they are stripped before validation.
/// Rendering re-inserts the canonical 8-4-4-4-12 grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BankAccountID {
    bank: BankCode,
    suffix: String,
}

impl BankAccountID {
    /// Parses a full 32-hex-character identifier, dashes optional.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let stripped: String = raw.chars().filter(|c| *c != '-').collect();
        if stripped.len() != 32 {
            return Err(LedgerError::format(
                "account id",
                raw,
                format!("expected 32 hex characters, got {}", stripped.len()),
            ));
        }
        if !is_uppercase_hex(&stripped) {
            return Err(LedgerError::format(
                "account id",
                raw,
                "expected uppercase hexadecimal characters",
            ));
        }
        let bank = BankCode::new(&stripped[..4])?;
        Ok(Self {
            bank,
            suffix: stripped[4..].to_string(),
        })
    }

    /// Builds an identifier from a 28-character suffix and an explicit code.
    pub fn from_parts(bank: BankCode, suffix: &str) -> Result<Self, LedgerError> {
        let stripped: String = suffix.chars().filter(|c| *c != '-').collect();
        if stripped.len() != 28 {
            return Err(LedgerError::format(
                "account suffix",
                suffix,
                format!("expected 28 hex characters, got {}", stripped.len()),
            ));
        }
        if !is_uppercase_hex(&stripped) {
            return Err(LedgerError::format(
                "account suffix",
                suffix,
                "expected uppercase hexadecimal characters",
            ));
        }
        Ok(Self {
            bank,
            suffix: stripped,
        })
    }

    pub fn bank_code(&self) -> &BankCode {
        &self.bank
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Bank code and suffix as one 32-character string, no dashes.
    pub fn normalized(&self) -> String {
        format!("{}{}", self.bank.as_str(), self.suffix)
    }
}

impl fmt::Display for BankAccountID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}-{}-{}-{}-{}",
            self.bank,
            &self.suffix[..4],
            &self.suffix[4..8],
            &self.suffix[8..12],
            &self.suffix[12..16],
            &self.suffix[16..]
        )
    }
}

impl FromStr for BankAccountID {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
