use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::bank::BankCode;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid {field} `{value}`: {reason}")]
    Format {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("cannot transfer the negative amount {amount}")]
    NegativeAmount { amount: Decimal },
    #[error("unrecognized ISO 4217 currency code `{code}`")]
    UnknownCurrency { code: String },
    #[error("cannot calculate balances without date-indexed currency rates")]
    MissingRateTable,
    #[error(
        "transaction `{transaction_id}` involves neither side of bank {bank}: \
         every listed transaction must be internal, incoming, or outgoing"
    )]
    ForeignTransaction {
        transaction_id: String,
        bank: BankCode,
    },
}

impl LedgerError {
    pub(crate) fn format(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        LedgerError::Format {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
