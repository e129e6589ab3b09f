//! Generates a fake transaction corpus with matching currency rates.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use bankmanager::config;
use bankmanager::generate::{generate_corpus, GeneratorConfig};

/// Generate fake bank transaction logs with matching currency rates.
#[derive(Parser)]
#[command(name = "ledgergen", version, about)]
struct Args {
    /// Folder that receives the generated logs and index
    #[arg(short = 't', long, default_value = "./transactions")]
    transaction_folder: PathBuf,

    /// Name of the currency rates snapshot written inside the folder
    #[arg(short = 'c', long, default_value = config::RATES_FILE)]
    currency_rates: String,

    /// Number of banks
    #[arg(short, long, default_value_t = 10)]
    banks: usize,

    /// Number of logs per bank
    #[arg(short, long, default_value_t = 10)]
    entries: usize,

    /// Number of transactions per log
    #[arg(short, long, default_value_t = 10)]
    logsize: usize,
}

fn main() -> ExitCode {
    bankmanager::init();
    let args = Args::parse();
    let sizes = GeneratorConfig {
        banks: args.banks,
        logs_per_bank: args.entries,
        transactions_per_log: args.logsize,
    };
    match generate_corpus(&sizes, &args.transaction_folder, &args.currency_rates) {
        Ok(summary) => {
            println!(
                "generated {} transactions in {} log files for {} banks ({} rate entries)",
                summary.transactions, summary.log_files, summary.banks, summary.rate_entries
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
