use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currency::{Currency, RateTable};
use crate::errors::LedgerError;

use super::bank::Bank;
use super::transaction::{Category, Flow, Transaction};

/// Converted total and transaction count for one direction of flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowTotal {
    pub total: Decimal,
    pub count: usize,
}

/// Aggregated balances for one list, in the rate table's base currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceReport {
    pub incoming: FlowTotal,
    pub outgoing: FlowTotal,
    pub internal_count: usize,
    /// Conversions that fell back to parity because no rate was quoted at
    /// the transaction's instant.
    pub parity_fallbacks: usize,
}

impl BalanceReport {
    /// Net balance: incoming total minus outgoing total.
    pub fn net(&self) -> Decimal {
        self.incoming.total - self.outgoing.total
    }
}

/// Ordered, append-only transactions scoped to one bank.
///
/// The list tracks the categories, calendar dates, and currencies it has
/// seen, and keeps the last computed net balance until the next append.
#[derive(Debug, Clone)]
pub struct TransactionList {
    bank: Arc<Bank>,
    rates: Option<Arc<RateTable>>,
    transactions: Vec<Transaction>,
    categories: BTreeSet<Option<Category>>,
    dates: BTreeSet<NaiveDate>,
    currencies: BTreeMap<Currency, usize>,
    cached_net: Option<Decimal>,
}

impl TransactionList {
    pub fn new(bank: Arc<Bank>, rates: Option<Arc<RateTable>>) -> Self {
        Self {
            bank,
            rates,
            transactions: Vec::new(),
            categories: BTreeSet::new(),
            dates: BTreeSet::new(),
            currencies: BTreeMap::new(),
            cached_net: None,
        }
    }

    /// Constructs a transaction from raw fields and appends it.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transaction(
        &mut self,
        date: &str,
        source: &str,
        destination: &str,
        transaction_id: &str,
        amount: &str,
        currency: &str,
        category: Option<&str>,
    ) -> Result<(), LedgerError> {
        let transaction = Transaction::new(
            date,
            source,
            destination,
            transaction_id,
            amount,
            currency,
            category,
        )?;
        self.push(transaction);
        Ok(())
    }

    /// Appends an already-built transaction.
    pub fn push(&mut self, transaction: Transaction) {
        self.categories
            .insert(transaction.category().cloned());
        self.dates.insert(transaction.local_date());
        *self
            .currencies
            .entry(transaction.currency().clone())
            .or_insert(0) += 1;
        self.transactions.push(transaction);
        self.cached_net = None;
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_handle(&self) -> Arc<Bank> {
        Arc::clone(&self.bank)
    }

    pub fn rates(&self) -> Option<&RateTable> {
        self.rates.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Every category observed so far; `None` marks uncategorized transfers.
    pub fn categories(&self) -> &BTreeSet<Option<Category>> {
        &self.categories
    }

    /// Every local calendar date observed so far.
    pub fn dates(&self) -> &BTreeSet<NaiveDate> {
        &self.dates
    }

    /// Transaction counts per currency code.
    pub fn currencies(&self) -> &BTreeMap<Currency, usize> {
        &self.currencies
    }

    /// Net balance from the last calculation, cleared by every append.
    pub fn balance(&self) -> Option<Decimal> {
        self.cached_net
    }

    /// Converts every transaction into the base currency and aggregates it
    /// by direction.
    ///
    /// `rates` overrides the table the list was built with; one of the two
    /// must be present. A currency with no rate quoted at the transaction's
    /// instant converts at parity, which is logged and counted in the
    /// report. A transaction concerning neither side of this list's bank is
    /// a fatal error: the list was populated incorrectly.
    pub fn calculate_balance(
        &mut self,
        rates: Option<&RateTable>,
    ) -> Result<BalanceReport, LedgerError> {
        let rates = match rates {
            Some(table) => table,
            None => self.rates.as_deref().ok_or(LedgerError::MissingRateTable)?,
        };
        let mut report = BalanceReport::default();
        for transaction in &self.transactions {
            let rate = if transaction.currency() == rates.base() {
                Decimal::ONE
            } else {
                match rates.rate_at(transaction.currency(), transaction.utc_instant()) {
                    Some(rate) => rate,
                    None => {
                        report.parity_fallbacks += 1;
                        tracing::warn!(
                            "no {} rate quoted at {}, assuming parity with {}",
                            transaction.currency(),
                            transaction.utc_instant(),
                            rates.base()
                        );
                        Decimal::ONE
                    }
                }
            };
            match transaction.flow(self.bank.code()) {
                Some(Flow::Internal) => report.internal_count += 1,
                Some(Flow::Outgoing) => {
                    report.outgoing.total += transaction.amount() * rate;
                    report.outgoing.count += 1;
                }
                Some(Flow::Incoming) => {
                    report.incoming.total += transaction.amount() * rate;
                    report.incoming.count += 1;
                }
                None => {
                    return Err(LedgerError::ForeignTransaction {
                        transaction_id: transaction.transaction_id().to_string(),
                        bank: self.bank.code().clone(),
                    })
                }
            }
        }
        self.cached_net = Some(report.net());
        Ok(report)
    }

    /// Splits the list into one independent list per category bucket.
    ///
    /// Buckets share this list's bank and rate table; every transaction
    /// lands in exactly one bucket and the source list is untouched.
    pub fn categorize_by_category(&self) -> BTreeMap<Option<Category>, TransactionList> {
        let mut buckets = BTreeMap::new();
        for transaction in &self.transactions {
            buckets
                .entry(transaction.category().cloned())
                .or_insert_with(|| Self::new(Arc::clone(&self.bank), self.rates.clone()))
                .push(transaction.clone());
        }
        buckets
    }

    /// Splits the list into one independent list per local calendar date.
    pub fn categorize_by_date(&self) -> BTreeMap<NaiveDate, TransactionList> {
        let mut buckets = BTreeMap::new();
        for transaction in &self.transactions {
            buckets
                .entry(transaction.local_date())
                .or_insert_with(|| Self::new(Arc::clone(&self.bank), self.rates.clone()))
                .push(transaction.clone());
        }
        buckets
    }
}
