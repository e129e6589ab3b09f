//! Parses a transaction corpus and writes balance reports.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use bankmanager::config;
use bankmanager::errors::LedgerError;
use bankmanager::ingest::read_corpus;
use bankmanager::report::write_all_reports;
use bankmanager::utils::persistence::load_rate_table_from_file;

/// Parse transaction logs and write per-bank balance reports.
#[derive(Parser)]
#[command(name = "ledgerbal", version, about)]
struct Args {
    /// Folder holding the transaction logs and index
    #[arg(short = 't', long, default_value = "./transactions")]
    transaction_folder: PathBuf,

    /// Folder that receives the balance reports
    #[arg(short = 'r', long, default_value = "./results")]
    result_folder: PathBuf,

    /// Currency rates snapshot; defaults to the one inside the transaction folder
    #[arg(short = 'c', long)]
    currency_rates: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), LedgerError> {
    let rates_path = match &args.currency_rates {
        Some(path) => path.clone(),
        None => args.transaction_folder.join(config::RATES_FILE),
    };
    let rates = Arc::new(load_rate_table_from_file(&rates_path)?);
    let lists = read_corpus(&args.transaction_folder, Some(rates))?;
    write_all_reports(&lists, &args.result_folder)?;
    Ok(())
}

fn main() -> ExitCode {
    bankmanager::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => {
            println!("wrote balance reports to {}", args.result_folder.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
