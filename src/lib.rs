#![doc(test(attr(deny(warnings))))]

//! Bank Manager models bank transaction ledgers: validated identifiers,
//! currency-aware balance aggregation, and the flat-file pipeline that
//! generates, ingests, and reports on transaction logs.

pub mod config;
pub mod currency;
pub mod errors;
pub mod generate;
pub mod ingest;
pub mod ledger;
pub mod report;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bank Manager tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
