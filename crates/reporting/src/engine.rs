use std::collections::{BTreeMap, BTreeSet};

use core_types::{AggregationKind, Metric, Period, Record};
use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::table::{PivotBuilder, ReportTable, RowLabel};

/// A stateless calculator that turns raw per-bank-per-period records into
/// report tables.
#[derive(Debug, Default)]
pub struct ReportEngine {}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates records into one industry-wide figure per metric per
    /// period.
    ///
    /// Records outside `periods` are ignored; if nothing survives the filter
    /// the result is `ReportError::EmptyInput`, which callers surface as
    /// "no data for selection" rather than a failure. Surviving records are
    /// bucketed by period and combined per metric according to its declared
    /// aggregation kind. The output has one row per taxonomy metric (in
    /// canonical order) and one column per distinct period present in the
    /// filtered input.
    ///
    /// Column order is lexicographic by period name. That is a stability
    /// choice, not a contract: callers that need a specific order, such as
    /// the two explicitly compared periods, reorder through
    /// [`compare_columns`](Self::compare_columns).
    pub fn aggregate(
        &self,
        records: &[Record],
        periods: &[Period],
    ) -> Result<ReportTable, ReportError> {
        let wanted: BTreeSet<&Period> = periods.iter().collect();
        let mut buckets: BTreeMap<&Period, Vec<&Record>> = BTreeMap::new();
        for record in records.iter().filter(|r| wanted.contains(&r.period)) {
            buckets.entry(&record.period).or_default().push(record);
        }
        if buckets.is_empty() {
            return Err(ReportError::EmptyInput);
        }
        tracing::debug!(
            periods = buckets.len(),
            records = buckets.values().map(Vec::len).sum::<usize>(),
            "aggregating records into period buckets"
        );

        let columns: Vec<String> = buckets.keys().map(|p| p.to_string()).collect();
        let mut builder = PivotBuilder::new(columns);
        for metric in Metric::ALL {
            builder.seed_row(RowLabel::Metric(metric));
        }
        for (period, bucket) in &buckets {
            for metric in Metric::ALL {
                if let Some(value) = combine(metric, bucket) {
                    builder.set(RowLabel::Metric(metric), period.as_str(), value)?;
                }
            }
        }
        Ok(builder.build())
    }

    /// Restricts a table to the requested metrics, re-sorted into canonical
    /// rank order.
    ///
    /// Requested metrics that are not rows of `table` are silently dropped
    /// (a best-effort view, not an error), and rows that are not
    /// metric-labelled never pass the filter. Idempotent.
    pub fn select_metrics(&self, table: &ReportTable, metrics: &[Metric]) -> ReportTable {
        let wanted: BTreeSet<Metric> = metrics.iter().copied().collect();
        let mut rows: Vec<_> = table
            .rows
            .iter()
            .filter(|row| matches!(row.label, RowLabel::Metric(m) if wanted.contains(&m)))
            .cloned()
            .collect();
        rows.sort_by_key(|row| match row.label {
            RowLabel::Metric(m) => m.rank(),
            RowLabel::Bank(_) => usize::MAX,
        });
        ReportTable {
            columns: table.columns.clone(),
            rows,
            has_deltas: table.has_deltas,
        }
    }

    /// Builds a metric × bank comparison table for a single period, without
    /// aggregation.
    ///
    /// Each requested bank must have exactly one record for `period`; zero
    /// or several is a pivot conflict, never a silent pick. Rows cover the
    /// full taxonomy in canonical order; bank columns are lexicographic.
    pub fn compare_banks(
        &self,
        records: &[Record],
        period: &Period,
        banks: &[String],
    ) -> Result<ReportTable, ReportError> {
        let mut selected: Vec<&str> = banks.iter().map(String::as_str).collect();
        selected.sort_unstable();
        selected.dedup();

        let columns: Vec<String> = selected.iter().map(|b| b.to_string()).collect();
        let mut builder = PivotBuilder::new(columns);
        for metric in Metric::ALL {
            builder.seed_row(RowLabel::Metric(metric));
        }
        for bank in &selected {
            let matching: Vec<&Record> = records
                .iter()
                .filter(|r| r.bank == *bank && r.period == *period)
                .collect();
            if matching.len() != 1 {
                return Err(ReportError::PivotConflict(format!(
                    "bank '{bank}' has {} records for period '{period}', expected exactly one",
                    matching.len()
                )));
            }
            for metric in Metric::ALL {
                if let Some(value) = matching[0].value(metric) {
                    builder.set(RowLabel::Metric(metric), bank, value)?;
                }
            }
        }
        Ok(builder.build())
    }

    /// Builds a bank × period table for a single metric.
    ///
    /// Records are filtered to `periods` (`EmptyInput` if nothing survives)
    /// and bucketed by (bank, period); several records in one bucket are
    /// combined by the metric's declared aggregation kind, the same rule
    /// used everywhere else. Bank rows and period columns are lexicographic.
    pub fn metric_breakdown(
        &self,
        records: &[Record],
        metric: Metric,
        periods: &[Period],
    ) -> Result<ReportTable, ReportError> {
        let wanted: BTreeSet<&Period> = periods.iter().collect();
        let mut buckets: BTreeMap<(&str, &Period), Vec<&Record>> = BTreeMap::new();
        for record in records.iter().filter(|r| wanted.contains(&r.period)) {
            buckets
                .entry((record.bank.as_str(), &record.period))
                .or_default()
                .push(record);
        }
        if buckets.is_empty() {
            return Err(ReportError::EmptyInput);
        }

        let columns: Vec<String> = buckets
            .keys()
            .map(|(_, period)| period.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut builder = PivotBuilder::new(columns);
        for ((bank, period), bucket) in &buckets {
            builder.seed_row(RowLabel::Bank(bank.to_string()));
            if let Some(value) = combine(metric, bucket) {
                builder.set(RowLabel::Bank(bank.to_string()), period.as_str(), value)?;
            }
        }
        Ok(builder.build())
    }
}

/// Applies a metric's declared aggregation kind over one bucket of records.
///
/// Only values actually present count: a bucket where no record reports the
/// metric yields `None`, not zero, and a mean divides by the number of
/// reported values.
fn combine(metric: Metric, bucket: &[&Record]) -> Option<Decimal> {
    let values: Vec<Decimal> = bucket.iter().filter_map(|r| r.value(metric)).collect();
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    match metric.aggregation() {
        AggregationKind::Sum => Some(sum),
        AggregationKind::Mean => Some(sum / Decimal::from(values.len())),
    }
}
