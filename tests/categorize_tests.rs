mod common;

use std::sync::Arc;

use bankmanager::currency::RateTable;
use bankmanager::ledger::TransactionList;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn sample_list() -> TransactionList {
    let mut list = common::list_for("AAAA", Some(Arc::new(RateTable::new())));
    let rows = [
        ("OUT-1", "10", Some("groceries"), "2024-03-01T10:00:00+00:00"),
        ("OUT-2", "20", Some("rent"), "2024-03-01T11:00:00+00:00"),
        ("OUT-3", "30", Some("groceries"), "2024-03-02T10:00:00+00:00"),
        ("OUT-4", "40", None, "2024-03-02T11:00:00+00:00"),
        ("OUT-5", "50", None, "2024-03-03T10:00:00+00:00"),
    ];
    for (id, amount, category, stamp) in rows {
        list.add_transaction(
            stamp,
            &common::account("AAAA", '1'),
            &common::account("BBBB", '2'),
            id,
            amount,
            "USD",
            category,
        )
        .expect("valid transaction");
    }
    list
}

#[test]
fn category_buckets_partition_the_list() {
    let list = sample_list();
    let buckets = list.categorize_by_category();

    assert_eq!(buckets.len(), 3);
    let total: usize = buckets.values().map(|bucket| bucket.len()).sum();
    assert_eq!(total, list.len());
    assert_eq!(list.len(), 5);

    for (label, bucket) in &buckets {
        for transaction in bucket.transactions() {
            assert_eq!(transaction.category(), label.as_ref());
        }
    }

    let uncategorized = buckets.get(&None).expect("uncategorized bucket");
    assert_eq!(uncategorized.len(), 2);
}

#[test]
fn buckets_share_the_bank_and_rate_table() {
    let list = sample_list();
    for (_, mut bucket) in list.categorize_by_category() {
        assert_eq!(bucket.bank().code(), list.bank().code());
        assert!(bucket.rates().is_some());
        bucket.calculate_balance(None).expect("bucket balance");
    }
    assert_eq!(list.balance(), None);
}

#[test]
fn date_buckets_group_by_the_local_calendar_date() {
    let mut list = common::list_for("AAAA", Some(Arc::new(RateTable::new())));
    let rows = [
        ("LATE-1", "2024-03-01T23:30:00-05:00"),
        ("NOON-1", "2024-03-01T10:00:00+00:00"),
        ("NEXT-1", "2024-03-02T01:00:00+00:00"),
    ];
    for (id, stamp) in rows {
        list.add_transaction(
            stamp,
            &common::account("AAAA", '1'),
            &common::account("BBBB", '2'),
            id,
            "10",
            "USD",
            None,
        )
        .expect("valid transaction");
    }

    let buckets = list.categorize_by_date();
    let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let second = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets.get(&first).map(|bucket| bucket.len()), Some(2));
    assert_eq!(buckets.get(&second).map(|bucket| bucket.len()), Some(1));
}

#[test]
fn bucket_nets_sum_to_the_whole_net() {
    let mut list = sample_list();
    let whole = list.calculate_balance(None).expect("whole balance").net();

    let mut recombined = Decimal::ZERO;
    let mut seen = 0;
    for (_, mut bucket) in list.categorize_by_category() {
        let report = bucket.calculate_balance(None).expect("bucket balance");
        recombined += report.net();
        seen += report.incoming.count + report.outgoing.count + report.internal_count;
    }

    assert_eq!(recombined, whole);
    assert_eq!(seen, list.len());
}
