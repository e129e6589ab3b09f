//! Balance report writers.
//!
//! Reports are plain headerless CSV so they can be diffed and spreadsheet
//! imported without ceremony. Every amount column is in the rate table's
//! base currency, which is repeated on each row.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::info;

use crate::config;
use crate::errors::LedgerError;
use crate::ledger::{BankCode, TransactionList};

/// Writes the roster of parsed banks: code, display name, sorted by code.
pub fn write_bank_roster(
    lists: &BTreeMap<BankCode, TransactionList>,
    path: &Path,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_path(path)?;
    for (code, list) in lists {
        writer.write_record([code.as_str(), list.bank().name()])?;
    }
    writer.flush()?;
    info!("wrote bank roster to {}", path.display());
    Ok(())
}

/// Writes one bank's balances per local calendar date.
///
/// Row layout: date, base currency, incoming total, incoming count,
/// outgoing total, outgoing count. Rows are sorted by date.
pub fn write_daily_balances(
    list: &TransactionList,
    result_folder: &Path,
) -> Result<PathBuf, LedgerError> {
    let base = list.rates().ok_or(LedgerError::MissingRateTable)?.base().clone();
    let path = result_folder.join(format!(
        "{}{}",
        list.bank().code(),
        config::DAILY_BALANCES_SUFFIX
    ));
    let mut writer = Writer::from_path(&path)?;
    for (date, mut bucket) in list.categorize_by_date() {
        let report = bucket.calculate_balance(None)?;
        writer.write_record([
            date.to_string(),
            base.to_string(),
            report.incoming.total.to_string(),
            report.incoming.count.to_string(),
            report.outgoing.total.to_string(),
            report.outgoing.count.to_string(),
        ])?;
    }
    writer.flush()?;
    info!("wrote daily balances to {}", path.display());
    Ok(path)
}

/// Writes one bank's balances per category.
///
/// Row layout: category (empty for uncategorized), base currency, net
/// balance, total transaction count. Rows are sorted by category with the
/// uncategorized bucket first.
pub fn write_category_balances(
    list: &TransactionList,
    result_folder: &Path,
) -> Result<PathBuf, LedgerError> {
    let base = list.rates().ok_or(LedgerError::MissingRateTable)?.base().clone();
    let path = result_folder.join(format!(
        "{}{}",
        list.bank().code(),
        config::CATEGORIES_SUFFIX
    ));
    let mut writer = Writer::from_path(&path)?;
    for (category, mut bucket) in list.categorize_by_category() {
        let report = bucket.calculate_balance(None)?;
        let label = category.map(|c| c.to_string()).unwrap_or_default();
        let transactions =
            report.incoming.count + report.outgoing.count + report.internal_count;
        writer.write_record([
            label,
            base.to_string(),
            report.net().to_string(),
            transactions.to_string(),
        ])?;
    }
    writer.flush()?;
    info!("wrote category balances to {}", path.display());
    Ok(path)
}

/// Writes the roster plus both per-bank reports for every parsed bank.
pub fn write_all_reports(
    lists: &BTreeMap<BankCode, TransactionList>,
    result_folder: &Path,
) -> Result<(), LedgerError> {
    fs::create_dir_all(result_folder)?;
    write_bank_roster(lists, &result_folder.join(config::BANKS_FILE))?;
    for list in lists.values() {
        write_daily_balances(list, result_folder)?;
        write_category_balances(list, result_folder)?;
    }
    Ok(())
}
