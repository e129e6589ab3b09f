//! Fake corpus generator.
//!
//! Produces the same folder layout [`crate::ingest`] consumes: per-bank log
//! files, a `transactions.csv` index naming them, and a rates snapshot
//! quoting every (currency, instant) the logs mention. Cross-bank transfers
//! are queued and flushed into the counterparty's `<CODE>_pending.csv` so
//! each log file stays scoped to a single bank.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::Writer;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config;
use crate::currency::{Currency, RateTable};
use crate::errors::LedgerError;
use crate::ledger::{BankAccountID, BankCode, BankZone};
use crate::utils::persistence::save_rate_table_to_file;

const HEX: &[u8] = b"0123456789ABCDEF";

const NAME_POOL: &[&str] = &[
    "Mason", "Olivia", "Noah", "Amelia", "Wei", "Fatima", "Diego", "Ingrid", "Ravi", "Sofia",
    "Kenji", "Amara", "Lucas", "Freya", "Omar", "Bianca", "Tariq", "Helena", "Mateo", "Priya",
];

/// One transaction log row, already rendered to its seven CSV fields.
type LogRow = [String; 7];

/// Tunable sizes for a generated corpus.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub banks: usize,
    pub logs_per_bank: usize,
    pub transactions_per_log: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            banks: 10,
            logs_per_bank: 10,
            transactions_per_log: 10,
        }
    }
}

/// What a generation run produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusSummary {
    pub banks: usize,
    pub log_files: usize,
    pub transactions: usize,
    pub rate_entries: usize,
}

struct RosterEntry {
    code: BankCode,
    zone: BankZone,
    name: String,
}

/// Generates a corpus folder and its rates snapshot.
pub fn generate_corpus(
    sizes: &GeneratorConfig,
    folder: &Path,
    rates_file: &str,
) -> Result<CorpusSummary, LedgerError> {
    fs::create_dir_all(folder)?;
    let mut rng = rand::thread_rng();
    let mut table = RateTable::new();
    let mut summary = CorpusSummary::default();

    let mut roster: Vec<RosterEntry> = Vec::with_capacity(sizes.banks);
    while roster.len() < sizes.banks {
        let code = BankCode::new(random_hex(&mut rng, 4))?;
        if roster.iter().any(|entry| entry.code == code) {
            continue;
        }
        let zone = random_zone(&mut rng)?;
        let name = format!(
            "{} Bank",
            NAME_POOL.choose(&mut rng).copied().unwrap_or("Acme")
        );
        roster.push(RosterEntry { code, zone, name });
    }

    let mut index = Writer::from_path(folder.join(config::INDEX_FILE))?;
    let mut pending: BTreeMap<BankCode, Vec<LogRow>> = BTreeMap::new();

    for entry in &roster {
        info!("generating logs for bank {}", entry.code);
        let others: Vec<&RosterEntry> = roster
            .iter()
            .filter(|other| other.code != entry.code)
            .collect();
        let zone_rendered = entry.zone.to_string();
        for log_idx in 0..sizes.logs_per_bank {
            let stamp = random_timestamp(&mut rng, entry.zone);
            let at = parse_instant(&stamp)?;
            let file_name = format!("{}_{:04}.csv", entry.code, log_idx);
            let mut writer = Writer::from_path(folder.join(&file_name))?;
            for _ in 0..sizes.transactions_per_log {
                let row = random_row(
                    &mut rng,
                    entry,
                    &others,
                    &stamp,
                    at,
                    &mut table,
                    &mut pending,
                )?;
                writer.write_record(&row)?;
                summary.transactions += 1;
            }
            writer.flush()?;
            index.write_record([
                stamp.as_str(),
                entry.code.as_str(),
                zone_rendered.as_str(),
                file_name.as_str(),
                entry.name.as_str(),
            ])?;
            summary.log_files += 1;
        }
    }

    for (code, rows) in &pending {
        let entry = match roster.iter().find(|entry| entry.code == *code) {
            Some(entry) => entry,
            None => continue,
        };
        info!("flushing {} pending transactions for bank {}", rows.len(), code);
        let file_name = format!("{}_pending.csv", code);
        let mut writer = Writer::from_path(folder.join(&file_name))?;
        for row in rows {
            writer.write_record(row)?;
            summary.transactions += 1;
        }
        writer.flush()?;
        let stamp = random_timestamp(&mut rng, entry.zone);
        let zone_rendered = entry.zone.to_string();
        index.write_record([
            stamp.as_str(),
            code.as_str(),
            zone_rendered.as_str(),
            file_name.as_str(),
            entry.name.as_str(),
        ])?;
        summary.log_files += 1;
    }
    index.flush()?;

    save_rate_table_to_file(&table, &folder.join(rates_file))?;
    summary.banks = roster.len();
    summary.rate_entries = table.len();
    info!(
        "generated {} transactions across {} log files for {} banks",
        summary.transactions, summary.log_files, summary.banks
    );
    Ok(summary)
}

/// One log row: currency and rate are registered as a side effect, and
/// cross-bank rows are queued under the counterparty's code.
#[allow(clippy::too_many_arguments)]
fn random_row(
    rng: &mut impl Rng,
    bank: &RosterEntry,
    others: &[&RosterEntry],
    stamp: &str,
    at: DateTime<Utc>,
    table: &mut RateTable,
    pending: &mut BTreeMap<BankCode, Vec<LogRow>>,
) -> Result<LogRow, LedgerError> {
    let code = Currency::all_codes()
        .choose(rng)
        .copied()
        .unwrap_or(config::DEFAULT_BASE_CURRENCY);
    let currency = Currency::new(code)?;
    table.insert(currency.clone(), Decimal::from(rng.gen_range(0..=100u32)), at);

    let amount = Decimal::new(rng.gen_range(1..=9_999_999), 2);
    let category = NAME_POOL.choose(rng).copied().unwrap_or("misc").to_string();
    let counterparty = others.choose(rng).copied();

    let (source, destination, other) = match counterparty {
        Some(other_bank) => match rng.gen_range(0..3) {
            0 => (
                random_account(&bank.code)?,
                random_account(&bank.code)?,
                None,
            ),
            1 => (
                random_account(&bank.code)?,
                random_account(&other_bank.code)?,
                Some(other_bank),
            ),
            _ => (
                random_account(&other_bank.code)?,
                random_account(&bank.code)?,
                Some(other_bank),
            ),
        },
        None => (
            random_account(&bank.code)?,
            random_account(&bank.code)?,
            None,
        ),
    };

    let row: LogRow = [
        stamp.to_string(),
        random_transaction_id(),
        source.to_string(),
        destination.to_string(),
        amount.to_string(),
        currency.to_string(),
        category,
    ];
    if let Some(other_bank) = other {
        pending
            .entry(other_bank.code.clone())
            .or_default()
            .push(row.clone());
    }
    Ok(row)
}

fn random_hex(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

fn random_zone(rng: &mut impl Rng) -> Result<BankZone, LedgerError> {
    let hours: i32 = rng.gen_range(-12..=14);
    let minutes = [0, 30, 45].choose(rng).copied().unwrap_or(0);
    let rendered = format!(
        "UTC{}{:02}:{:02}",
        if hours < 0 { '-' } else { '+' },
        hours.abs(),
        minutes
    );
    rendered.parse()
}

fn random_timestamp(rng: &mut impl Rng, zone: BankZone) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}",
        rng.gen_range(2020..=2025),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60),
        zone.to_string().trim_start_matches("UTC")
    )
}

fn parse_instant(stamp: &str) -> Result<DateTime<Utc>, LedgerError> {
    Ok(DateTime::parse_from_rfc3339(stamp)
        .map_err(|err| LedgerError::format("date", stamp, err.to_string()))?
        .with_timezone(&Utc))
}

/// Bank code plus a fresh v4 UUID tail; the uppercased hyphenated form is
/// exactly the 8-4-4-4-12 hex shape the logs carry.
fn random_account(bank: &BankCode) -> Result<BankAccountID, LedgerError> {
    let tail = Uuid::new_v4().to_string().to_uppercase();
    BankAccountID::from_parts(bank.clone(), &tail[4..])
}

fn random_transaction_id() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}
