use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::currency::Currency;
use crate::errors::LedgerError;

use super::account::BankAccountID;
use super::bank::BankCode;

/// Label attached to a transfer, restricted to `[0-9A-Za-z_.-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Result<Self, LedgerError> {
        let label = label.into();
        if label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            Ok(Self(label))
        } else {
            Err(LedgerError::format(
                "category",
                &label,
                "only letters, digits, `_`, `.`, and `-` are allowed",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Direction of a transfer relative to a reference bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Internal,
    Outgoing,
    Incoming,
}

/// A single transfer between two accounts.
///
/// Constructed once from raw fields and never mutated afterwards. A
/// transaction knows nothing about the bank that logged it; direction is
/// always judged against a caller-supplied reference code.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    date: DateTime<FixedOffset>,
    source: BankAccountID,
    destination: BankAccountID,
    id: String,
    amount: Decimal,
    currency: Currency,
    category: Option<Category>,
}

impl Transaction {
    /// Parses and validates raw transaction fields.
    ///
    /// `date` must be an ISO 8601 timestamp carrying its UTC offset. A
    /// `None` category means the transfer is uncategorized.
    pub fn new(
        date: &str,
        source: &str,
        destination: &str,
        transaction_id: &str,
        amount: &str,
        currency: &str,
        category: Option<&str>,
    ) -> Result<Self, LedgerError> {
        let date = DateTime::parse_from_rfc3339(date)
            .map_err(|err| LedgerError::format("date", date, err.to_string()))?;
        let amount = Decimal::from_str(amount)
            .map_err(|err| LedgerError::format("amount", amount, err.to_string()))?;
        Self::from_parts(
            date,
            BankAccountID::parse(source)?,
            BankAccountID::parse(destination)?,
            transaction_id.to_string(),
            amount,
            Currency::new(currency)?,
            category.map(Category::new).transpose()?,
        )
    }

    /// Assembles a transaction from already-typed parts.
    pub fn from_parts(
        date: DateTime<FixedOffset>,
        source: BankAccountID,
        destination: BankAccountID,
        transaction_id: String,
        amount: Decimal,
        currency: Currency,
        category: Option<Category>,
    ) -> Result<Self, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { amount });
        }
        Ok(Self {
            date,
            source,
            destination,
            id: transaction_id,
            amount,
            currency,
            category,
        })
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn source(&self) -> &BankAccountID {
        &self.source
    }

    pub fn destination(&self) -> &BankAccountID {
        &self.destination
    }

    pub fn transaction_id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Calendar date in the transaction's own offset.
    pub fn local_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// The same instant normalized to UTC; rate lookups key on this.
    pub fn utc_instant(&self) -> DateTime<Utc> {
        self.date.with_timezone(&Utc)
    }

    /// True when source and destination belong to the same bank.
    pub fn internal(&self) -> bool {
        self.source.bank_code() == self.destination.bank_code()
    }

    /// Three-way classification relative to `reference`, or `None` when the
    /// transfer does not concern that bank.
    pub fn flow(&self, reference: &BankCode) -> Option<Flow> {
        if self.internal() {
            if self.source.bank_code() == reference {
                Some(Flow::Internal)
            } else {
                None
            }
        } else if self.source.bank_code() == reference {
            Some(Flow::Outgoing)
        } else if self.destination.bank_code() == reference {
            Some(Flow::Incoming)
        } else {
            None
        }
    }

    pub fn is_outgoing(&self, reference: &BankCode) -> bool {
        matches!(self.flow(reference), Some(Flow::Outgoing))
    }

    pub fn is_incoming(&self, reference: &BankCode) -> bool {
        matches!(self.flow(reference), Some(Flow::Incoming))
    }

    /// True when either side of the transfer belongs to `reference`.
    pub fn concerns_bank(&self, reference: &BankCode) -> bool {
        self.source.bank_code() == reference || self.destination.bank_code() == reference
    }

    /// The counterparty bank of an external transfer; `None` on internal
    /// transfers or when `reference` matches neither side.
    pub fn other_bank(&self, reference: &BankCode) -> Option<&BankCode> {
        if self.internal() {
            return None;
        }
        if self.source.bank_code() == reference {
            Some(self.destination.bank_code())
        } else if self.destination.bank_code() == reference {
            Some(self.source.bank_code())
        } else {
            None
        }
    }
}
