use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rust_decimal::Decimal;

use bankmanager::currency::{Currency, RateTable};
use bankmanager::ledger::{Bank, BankCode, BankZone, TransactionList};

const STAMP: &str = "2024-03-01T09:00:00+00:00";

fn build_list(transactions: usize) -> TransactionList {
    let mut table = RateTable::new();
    let at = DateTime::parse_from_rfc3339(STAMP).unwrap().with_timezone(&Utc);
    table.insert(Currency::new("EUR").unwrap(), Decimal::new(11, 1), at);

    let bank = Arc::new(Bank::new(
        BankCode::new("AAAA").unwrap(),
        BankZone::from_str("UTC+00:00").unwrap(),
        Some("Benchmark Bank".to_string()),
    ));
    let mut list = TransactionList::new(bank, Some(Arc::new(table)));
    for i in 0..transactions {
        let (source, destination) = match i % 3 {
            0 => ("AAAA1111-2222-3333-4444-555566667777", "AAAA9999-8888-7777-6666-555544443333"),
            1 => ("AAAA1111-2222-3333-4444-555566667777", "BBBB9999-8888-7777-6666-555544443333"),
            _ => ("BBBB1111-2222-3333-4444-555566667777", "AAAA9999-8888-7777-6666-555544443333"),
        };
        let currency = if i % 2 == 0 { "USD" } else { "EUR" };
        list.add_transaction(STAMP, source, destination, "FFFF0000", "25.50", currency, Some("rent"))
            .unwrap();
    }
    list
}

fn balance_benchmark(c: &mut Criterion) {
    let list = build_list(10_000);
    c.bench_function("calculate_balance_10k", |b| {
        b.iter_batched(
            || list.clone(),
            |mut list| list.calculate_balance(None).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, balance_benchmark);
criterion_main!(benches);
