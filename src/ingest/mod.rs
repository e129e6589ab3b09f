//! Readers for transaction corpora on disk.
//!
//! A corpus folder holds one index file (`transactions.csv`) naming every
//! per-bank log file, the log files themselves, and usually a rates
//! snapshot. Both CSV layouts are headerless; see [`crate::generate`] for
//! the writer side.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::config;
use crate::currency::RateTable;
use crate::errors::LedgerError;
use crate::ledger::{Bank, BankCode, BankZone, TransactionList};

/// Fields per row in a transaction log.
const LOG_FIELDS: usize = 7;
/// Fields per row in the index file.
const INDEX_FIELDS: usize = 5;

/// Reads one headerless transaction log into an existing list.
///
/// Row layout: date, transaction id, source, destination, amount, currency,
/// category. An empty category field means the transfer is uncategorized.
/// Returns the number of ingested rows.
pub fn read_log_file(path: &Path, list: &mut TransactionList) -> Result<usize, LedgerError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        if record.len() != LOG_FIELDS {
            return Err(LedgerError::format(
                "log row",
                &record.iter().collect::<Vec<_>>().join(","),
                format!("expected {} fields, got {}", LOG_FIELDS, record.len()),
            ));
        }
        let category = match &record[6] {
            "" => None,
            label => Some(label),
        };
        list.add_transaction(
            &record[0],
            &record[2],
            &record[3],
            &record[1],
            &record[4],
            &record[5],
            category,
        )?;
        rows += 1;
    }
    debug!("ingested {} transactions from {}", rows, path.display());
    Ok(rows)
}

/// Reads a corpus folder into one transaction list per bank.
///
/// The index file maps log files to banks: date, bank code, timezone, log
/// file, bank name. The first index row for a code decides the bank's
/// timezone and name; every log is ingested into that bank's list. All
/// lists share the given rate table.
pub fn read_corpus(
    folder: &Path,
    rates: Option<Arc<RateTable>>,
) -> Result<BTreeMap<BankCode, TransactionList>, LedgerError> {
    let index = folder.join(config::INDEX_FILE);
    let mut reader = ReaderBuilder::new().has_headers(false).from_path(&index)?;
    let mut lists: BTreeMap<BankCode, TransactionList> = BTreeMap::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != INDEX_FIELDS {
            return Err(LedgerError::format(
                "index row",
                &record.iter().collect::<Vec<_>>().join(","),
                format!("expected {} fields, got {}", INDEX_FIELDS, record.len()),
            ));
        }
        let code = BankCode::new(&record[1])?;
        let timezone = BankZone::from_str(&record[2])?;
        let name = record[4].to_string();
        let list = lists.entry(code.clone()).or_insert_with(|| {
            TransactionList::new(
                Arc::new(Bank::new(code, timezone, Some(name))),
                rates.clone(),
            )
        });
        read_log_file(&folder.join(&record[3]), list)?;
    }
    info!(
        "parsed {} banks from {}",
        lists.len(),
        index.display()
    );
    Ok(lists)
}
