mod common;

use std::sync::Arc;

use bankmanager::config;
use bankmanager::errors::LedgerError;
use bankmanager::generate::{generate_corpus, GeneratorConfig};
use bankmanager::ingest::read_corpus;
use bankmanager::report::write_all_reports;
use bankmanager::utils::persistence::load_rate_table_from_file;
use rust_decimal::Decimal;

#[test]
fn generated_corpora_parse_back_with_exact_conservation() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let sizes = GeneratorConfig {
        banks: 4,
        logs_per_bank: 2,
        transactions_per_log: 5,
    };

    let summary = generate_corpus(&sizes, dir.path(), config::RATES_FILE).expect("generate");
    assert_eq!(summary.banks, 4);
    assert!(summary.log_files >= 8);
    assert!(summary.transactions >= 40);

    let rates = load_rate_table_from_file(&dir.path().join(config::RATES_FILE)).expect("rates");
    assert_eq!(rates.len(), summary.rate_entries);

    let lists = read_corpus(dir.path(), Some(Arc::new(rates))).expect("parse corpus");
    assert_eq!(lists.len(), 4);

    let parsed: usize = lists.values().map(|list| list.len()).sum();
    assert_eq!(parsed, summary.transactions);

    let mut total = Decimal::ZERO;
    for (_, mut list) in lists {
        let report = list.calculate_balance(None).expect("balance");
        assert_eq!(report.parity_fallbacks, 0);
        total += report.net();
    }
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn single_bank_corpora_stay_internal() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let sizes = GeneratorConfig {
        banks: 1,
        logs_per_bank: 2,
        transactions_per_log: 6,
    };

    let summary = generate_corpus(&sizes, dir.path(), config::RATES_FILE).expect("generate");
    assert_eq!(summary.log_files, 2);
    assert_eq!(summary.transactions, 12);

    let rates = load_rate_table_from_file(&dir.path().join(config::RATES_FILE)).expect("rates");
    let lists = read_corpus(dir.path(), Some(Arc::new(rates))).expect("parse corpus");
    assert_eq!(lists.len(), 1);

    for (_, mut list) in lists {
        let report = list.calculate_balance(None).expect("balance");
        assert_eq!(report.internal_count, 12);
        assert_eq!(report.net(), Decimal::ZERO);
    }
}

#[test]
fn reports_cover_every_parsed_bank() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let sizes = GeneratorConfig {
        banks: 3,
        logs_per_bank: 2,
        transactions_per_log: 4,
    };
    generate_corpus(&sizes, dir.path(), config::RATES_FILE).expect("generate");

    let rates = load_rate_table_from_file(&dir.path().join(config::RATES_FILE)).expect("rates");
    let lists = read_corpus(dir.path(), Some(Arc::new(rates))).expect("parse corpus");
    let results = dir.path().join("results");
    write_all_reports(&lists, &results).expect("write reports");

    let mut roster = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(results.join(config::BANKS_FILE))
        .expect("open roster");
    let codes: Vec<String> = roster
        .records()
        .map(|record| record.expect("roster row")[0].to_string())
        .collect();
    let expected: Vec<String> = lists.keys().map(|code| code.as_str().to_string()).collect();
    assert_eq!(codes, expected);
    assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));

    for (code, list) in &lists {
        let daily = results.join(format!("{}{}", code, config::DAILY_BALANCES_SUFFIX));
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&daily)
            .expect("open daily balances");
        let mut rows = 0;
        for record in reader.records() {
            let record = record.expect("daily row");
            assert_eq!(&record[1], "USD");
            rows += 1;
        }
        assert_eq!(rows, list.dates().len());

        let categories = results.join(format!("{}{}", code, config::CATEGORIES_SUFFIX));
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&categories)
            .expect("open category balances");
        assert_eq!(reader.records().count(), list.categories().len());
    }
}

#[test]
fn hand_written_logs_round_trip_with_empty_categories() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join(config::INDEX_FILE),
        "2024-03-01T12:00:00+00:00,AAAA,UTC+00:00,AAAA_0000.csv,First Bank\n",
    )
    .expect("write index");
    std::fs::write(
        dir.path().join("AAAA_0000.csv"),
        format!(
            "2024-03-01T12:00:00+00:00,TX-1,{},{},10.50,USD,groceries\n\
             2024-03-01T12:00:00+00:00,TX-2,{},{},4.25,EUR,\n",
            common::account("AAAA", '1'),
            common::account("BBBB", '2'),
            common::account("BBBB", '2'),
            common::account("AAAA", '1'),
        ),
    )
    .expect("write log");

    let lists = read_corpus(dir.path(), None).expect("parse corpus");
    assert_eq!(lists.len(), 1);

    let list = lists.values().next().expect("one bank");
    assert_eq!(list.bank().name(), "First Bank");
    assert_eq!(list.bank().timezone().to_string(), "UTC+00:00");
    assert_eq!(list.len(), 2);

    let first = &list.transactions()[0];
    assert_eq!(first.transaction_id(), "TX-1");
    assert_eq!(first.amount(), Decimal::new(1050, 2));
    assert_eq!(first.category().expect("categorized").as_str(), "groceries");

    let second = &list.transactions()[1];
    assert_eq!(second.transaction_id(), "TX-2");
    assert_eq!(second.category(), None);
}

#[test]
fn repeated_index_codes_merge_keeping_the_first_identity() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join(config::INDEX_FILE),
        "2024-03-01T12:00:00+00:00,AAAA,UTC+00:00,AAAA_0000.csv,First Bank\n\
         2024-03-02T12:00:00+02:00,AAAA,UTC+02:00,AAAA_0001.csv,Second Name\n",
    )
    .expect("write index");
    for file in ["AAAA_0000.csv", "AAAA_0001.csv"] {
        std::fs::write(
            dir.path().join(file),
            format!(
                "2024-03-01T12:00:00+00:00,TX-{},{},{},10,USD,\n",
                file,
                common::account("AAAA", '1'),
                common::account("AAAA", '2'),
            ),
        )
        .expect("write log");
    }

    let lists = read_corpus(dir.path(), None).expect("parse corpus");
    assert_eq!(lists.len(), 1);

    let list = lists.values().next().expect("one bank");
    assert_eq!(list.bank().name(), "First Bank");
    assert_eq!(list.bank().timezone().to_string(), "UTC+00:00");
    assert_eq!(list.len(), 2);
}

#[test]
fn short_rows_are_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(
        dir.path().join(config::INDEX_FILE),
        "2024-03-01T12:00:00+00:00,AAAA,UTC+00:00,AAAA_0000.csv,First Bank\n",
    )
    .expect("write index");
    std::fs::write(
        dir.path().join("AAAA_0000.csv"),
        format!(
            "2024-03-01T12:00:00+00:00,TX-1,{},{},10,USD\n",
            common::account("AAAA", '1'),
            common::account("AAAA", '2'),
        ),
    )
    .expect("write log");

    let err = read_corpus(dir.path(), None).expect_err("six-field row");
    assert!(matches!(err, LedgerError::Format { .. }));
}
