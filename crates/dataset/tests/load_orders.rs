//! Integration tests for loading the order dataset from disk.
//!
//! The fixture mirrors the layout of the merged e-commerce export, including
//! the unnamed pandas index column, extra columns and float-typed scores.

use std::path::PathBuf;

use chrono::NaiveDate;
use dataset::{DatasetError, LoadOptions, load_orders};
use rust_decimal_macros::dec;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("orders.csv")
}

#[test]
fn loads_fixture_and_skips_out_of_range_score() {
    let loaded = load_orders(&fixture(), &LoadOptions::default()).expect("fixture should load");

    assert_eq!(loaded.rows_read, 13);
    assert_eq!(loaded.table.len(), 12);
    assert_eq!(loaded.rejected.len(), 1);
    assert_eq!(loaded.rejected[0].line, 14);
    assert_eq!(
        loaded.rejected[0].order_id.as_deref(),
        Some("f5a63d8e3f1d2a6ac41a7b7f4d5c2e10")
    );
}

#[test]
fn table_is_sorted_by_approval_with_unapproved_rows_last() {
    let loaded = load_orders(&fixture(), &LoadOptions::default()).unwrap();
    let records = loaded.table.records();

    let approvals: Vec<_> = records.iter().map(|r| r.approved_at()).collect();
    let approved: Vec<_> = approvals.iter().flatten().collect();
    assert!(approved.windows(2).all(|w| w[0] <= w[1]));

    let last = records.last().unwrap();
    assert_eq!(last.order_id, "1ebc3d6ab48c0f1bc2bf2b1feb1cf8e5");
    assert_eq!(last.approved_at(), None);
    assert_eq!(last.payment_value, Some(dec!(59.8)));
    assert_eq!(last.review_score, None);

    assert!(records.iter().enumerate().all(|(i, r)| r.row_index == i));
}

#[test]
fn approval_bounds_span_the_fixture() {
    let loaded = load_orders(&fixture(), &LoadOptions::default()).unwrap();
    let bounds = loaded.table.approval_bounds().unwrap();

    assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2017, 1, 25).unwrap());
    assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2018, 8, 8).unwrap());
}

#[test]
fn float_scores_and_missing_categories_are_typed() {
    let loaded = load_orders(&fixture(), &LoadOptions::default()).unwrap();
    let first = &loaded.table.records()[0];

    assert_eq!(first.order_id, "76c6e866289321a7c93b82b54852dc33");
    assert_eq!(first.review_score.map(|s| s.value()), Some(1));
    assert_eq!(first.category.as_deref(), Some("furniture_decor"));

    let uncategorised = loaded
        .table
        .records()
        .iter()
        .filter(|r| r.category.is_none())
        .count();
    assert_eq!(uncategorised, 3);
}

#[test]
fn strict_mode_rejects_the_fixture() {
    let options = LoadOptions {
        strict: true,
        ..LoadOptions::default()
    };
    assert!(matches!(
        load_orders(&fixture(), &options),
        Err(DatasetError::InvalidRow { line: 14, .. })
    ));
}
