#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use bankmanager::currency::RateTable;
use bankmanager::ledger::{Bank, BankCode, BankZone, TransactionList};
use chrono::{DateTime, Utc};

/// Bank pinned to UTC+00:00 and named after its code.
pub fn bank(code: &str) -> Arc<Bank> {
    Arc::new(Bank::new(
        BankCode::new(code).expect("valid bank code"),
        BankZone::from_str("UTC+00:00").expect("valid zone"),
        Some(format!("{} Bank", code)),
    ))
}

/// Empty list scoped to `code`, sharing the given rate table.
pub fn list_for(code: &str, rates: Option<Arc<RateTable>>) -> TransactionList {
    TransactionList::new(bank(code), rates)
}

/// Dashed 32-hex account string for a bank, with a recognizable fill.
pub fn account(code: &str, fill: char) -> String {
    let block = fill.to_string().repeat(4);
    format!(
        "{}{}-{}-{}-{}-{}{}{}",
        code, block, block, block, block, block, block, block
    )
}

/// Parses an RFC 3339 stamp into the UTC instant rate lookups key on.
pub fn instant(stamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(stamp)
        .expect("valid stamp")
        .with_timezone(&Utc)
}
