//! Engine-level tests exercising the public reporting API end to end.

use core_types::{Metric, Period, Record};
use reporting::{ReportEngine, ReportError, RowLabel};
use rust_decimal_macros::dec;

fn periods(ids: &[&str]) -> Vec<Period> {
    ids.iter().map(|id| Period::from(*id)).collect()
}

fn industry_records() -> Vec<Record> {
    vec![
        Record::new("Alpha Bank", "2023Q1")
            .with_value(Metric::TotalAssets, dec!(100))
            .with_value(Metric::Roe, dec!(10)),
        Record::new("Beta Bank", "2023Q1")
            .with_value(Metric::TotalAssets, dec!(200))
            .with_value(Metric::Roe, dec!(20)),
        Record::new("Alpha Bank", "2023Q2").with_value(Metric::TotalAssets, dec!(150)),
    ]
}

/// Balance-sheet figures sum across banks; ratios are averaged.
#[test]
fn aggregate_sums_figures_and_averages_ratios() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(&industry_records(), &periods(&["2023Q1"]))
        .unwrap();

    let assets = RowLabel::Metric(Metric::TotalAssets);
    let roe = RowLabel::Metric(Metric::Roe);
    assert_eq!(table.value(&assets, "2023Q1"), Some(dec!(300)));
    assert_eq!(table.value(&roe, "2023Q1"), Some(dec!(15)));
}

/// Periods aggregate independently: Q1 sees both banks, Q2 only one.
#[test]
fn aggregate_combines_each_period_on_its_own() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(&industry_records(), &periods(&["2023Q1", "2023Q2"]))
        .unwrap();

    let assets = RowLabel::Metric(Metric::TotalAssets);
    assert_eq!(table.value(&assets, "2023Q1"), Some(dec!(300)));
    assert_eq!(table.value(&assets, "2023Q2"), Some(dec!(150)));
}

/// The aggregate shape is fixed: one row per taxonomy metric, one column per
/// distinct period present in the filtered input.
#[test]
fn aggregate_covers_the_full_taxonomy_and_selected_periods() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(
            &industry_records(),
            &periods(&["2023Q1", "2023Q2", "2099Q9"]),
        )
        .unwrap();

    assert_eq!(table.rows.len(), Metric::ALL.len());
    // 2099Q9 has no records, so it contributes no column.
    assert_eq!(table.columns, vec!["2023Q1", "2023Q2"]);
}

/// A metric nobody reported keeps a row, with every cell missing.
#[test]
fn unreported_metrics_are_missing_not_zero() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(&industry_records(), &periods(&["2023Q1"]))
        .unwrap();

    let npl = table
        .rows
        .iter()
        .find(|row| row.label == RowLabel::Metric(Metric::Npl))
        .unwrap();
    assert!(npl.values.iter().all(Option::is_none));
}

#[test]
fn aggregate_over_zero_matching_records_is_empty_input() {
    let engine = ReportEngine::new();
    let err = engine
        .aggregate(&industry_records(), &periods(&["1999Q1"]))
        .unwrap_err();
    assert!(matches!(err, ReportError::EmptyInput));
}

/// Requested metrics come back in canonical rank order regardless of request
/// order, and metrics absent from the table are silently dropped.
#[test]
fn select_metrics_reorders_canonically_and_drops_absentees() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(&industry_records(), &periods(&["2023Q1"]))
        .unwrap();

    let narrowed = engine.select_metrics(&table, &[Metric::Roe, Metric::TotalAssets]);
    let labels: Vec<&RowLabel> = narrowed.rows.iter().map(|r| &r.label).collect();
    assert_eq!(
        labels,
        vec![
            &RowLabel::Metric(Metric::TotalAssets),
            &RowLabel::Metric(Metric::Roe),
        ]
    );

    // NPL is not a row of `narrowed` any more, so requesting it drops it.
    let again = engine.select_metrics(
        &narrowed,
        &[Metric::Npl, Metric::Roe, Metric::TotalAssets],
    );
    assert_eq!(again.rows.len(), 2);
}

#[test]
fn select_metrics_is_idempotent() {
    let engine = ReportEngine::new();
    let table = engine
        .aggregate(&industry_records(), &periods(&["2023Q1"]))
        .unwrap();

    let wanted = [Metric::LoansAndAdv, Metric::TotalAssets, Metric::BasicEps];
    let once = engine.select_metrics(&table, &wanted);
    let twice = engine.select_metrics(&once, &wanted);
    assert_eq!(once, twice);
}

#[test]
fn compare_banks_pivots_metrics_against_banks() {
    let engine = ReportEngine::new();
    let banks = ["Beta Bank".to_string(), "Alpha Bank".to_string()];
    let table = engine
        .compare_banks(&industry_records(), &Period::from("2023Q1"), &banks)
        .unwrap();

    // Bank columns are lexicographic, rows cover the whole taxonomy.
    assert_eq!(table.columns, vec!["Alpha Bank", "Beta Bank"]);
    assert_eq!(table.rows.len(), Metric::ALL.len());

    let assets = RowLabel::Metric(Metric::TotalAssets);
    assert_eq!(table.value(&assets, "Alpha Bank"), Some(dec!(100)));
    assert_eq!(table.value(&assets, "Beta Bank"), Some(dec!(200)));
}

/// Two records for one bank in the compared period are a conflict, never a
/// silent pick of one of them.
#[test]
fn compare_banks_rejects_duplicate_records() {
    let mut records = industry_records();
    records.push(Record::new("Alpha Bank", "2023Q1").with_value(Metric::TotalAssets, dec!(1)));

    let engine = ReportEngine::new();
    let err = engine
        .compare_banks(
            &records,
            &Period::from("2023Q1"),
            &["Alpha Bank".to_string()],
        )
        .unwrap_err();
    assert!(matches!(err, ReportError::PivotConflict(_)));
}

/// A requested bank with no record for the period is the same conflict.
#[test]
fn compare_banks_rejects_banks_without_a_record() {
    let engine = ReportEngine::new();
    let err = engine
        .compare_banks(
            &industry_records(),
            &Period::from("2023Q2"),
            &["Beta Bank".to_string()],
        )
        .unwrap_err();
    assert!(matches!(err, ReportError::PivotConflict(_)));
}

#[test]
fn metric_breakdown_pivots_banks_against_periods() {
    let engine = ReportEngine::new();
    let table = engine
        .metric_breakdown(
            &industry_records(),
            Metric::TotalAssets,
            &periods(&["2023Q1", "2023Q2"]),
        )
        .unwrap();

    assert_eq!(table.columns, vec!["2023Q1", "2023Q2"]);
    let alpha = RowLabel::Bank("Alpha Bank".to_string());
    let beta = RowLabel::Bank("Beta Bank".to_string());
    assert_eq!(table.value(&alpha, "2023Q1"), Some(dec!(100)));
    assert_eq!(table.value(&alpha, "2023Q2"), Some(dec!(150)));
    assert_eq!(table.value(&beta, "2023Q1"), Some(dec!(200)));
    assert_eq!(table.value(&beta, "2023Q2"), None);
}

/// Duplicate (bank, period) records in a breakdown combine by the metric's
/// declared aggregation kind, the same rule as industry aggregation.
#[test]
fn metric_breakdown_combines_duplicates_by_kind() {
    let records = vec![
        Record::new("Alpha Bank", "2023Q1")
            .with_value(Metric::TotalAssets, dec!(100))
            .with_value(Metric::Roe, dec!(10)),
        Record::new("Alpha Bank", "2023Q1")
            .with_value(Metric::TotalAssets, dec!(40))
            .with_value(Metric::Roe, dec!(20)),
    ];
    let engine = ReportEngine::new();
    let alpha = RowLabel::Bank("Alpha Bank".to_string());

    let assets = engine
        .metric_breakdown(&records, Metric::TotalAssets, &periods(&["2023Q1"]))
        .unwrap();
    assert_eq!(assets.value(&alpha, "2023Q1"), Some(dec!(140)));

    let roe = engine
        .metric_breakdown(&records, Metric::Roe, &periods(&["2023Q1"]))
        .unwrap();
    assert_eq!(roe.value(&alpha, "2023Q1"), Some(dec!(15)));
}

#[test]
fn metric_breakdown_over_zero_matching_records_is_empty_input() {
    let engine = ReportEngine::new();
    let err = engine
        .metric_breakdown(&industry_records(), Metric::Roe, &periods(&["1999Q1"]))
        .unwrap_err();
    assert!(matches!(err, ReportError::EmptyInput));
}

/// The two-period breakdown flow: pivot, then append deltas.
#[test]
fn breakdown_with_two_periods_supports_delta_columns() {
    let engine = ReportEngine::new();
    let table = engine
        .metric_breakdown(
            &industry_records(),
            Metric::TotalAssets,
            &periods(&["2023Q1", "2023Q2"]),
        )
        .unwrap();
    let compared = engine.compare_columns(&table, "2023Q1", "2023Q2");

    assert!(compared.has_deltas);
    let alpha = compared
        .rows
        .iter()
        .find(|row| row.label == RowLabel::Bank("Alpha Bank".to_string()))
        .unwrap();
    assert_eq!(alpha.change, Some(dec!(50)));
    assert_eq!(alpha.pct_change, Some(dec!(50)));
}
