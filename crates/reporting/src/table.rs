use std::collections::BTreeMap;
use std::fmt;

use core_types::Metric;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ReportError;

/// Identifies one row of a report table.
///
/// Industry-wide views and bank comparisons key their rows by metric; the
/// per-metric breakdown keys its rows by bank. A single table never mixes
/// the two.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RowLabel {
    Metric(Metric),
    Bank(String),
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Metric(metric) => write!(f, "{metric}"),
            RowLabel::Bank(bank) => write!(f, "{bank}"),
        }
    }
}

/// One row of a wide report table.
///
/// `values` is parallel to the owning table's `columns`; `None` marks a
/// missing figure. `change` and `pct_change` are populated only by the delta
/// calculator, and `pct_change` stays `None` for rows whose base value is
/// zero or missing, which downstream renders as a blank cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: RowLabel,
    pub values: Vec<Option<Decimal>>,
    pub change: Option<Decimal>,
    pub pct_change: Option<Decimal>,
}

impl ReportRow {
    pub fn new(label: RowLabel, values: Vec<Option<Decimal>>) -> Self {
        Self {
            label,
            values,
            change: None,
            pct_change: None,
        }
    }
}

/// A wide report table: labelled rows against named columns.
///
/// Tables are immutable values. Every engine operation that "modifies" a
/// table returns a new one, so a query can never observe a half-built
/// result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    /// True once the delta calculator has appended Change / Percentage
    /// Change to every row.
    pub has_deltas: bool,
}

impl ReportTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// The cell at (`label`, `column`), if the row, the column and the value
    /// all exist.
    pub fn value(&self, label: &RowLabel, column: &str) -> Option<Decimal> {
        let col = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| row.label == *label)
            .and_then(|row| row.values.get(col).copied().flatten())
    }

    /// Header text for the leftmost (row label) column.
    pub fn label_header(&self) -> &'static str {
        match self.rows.first() {
            Some(ReportRow {
                label: RowLabel::Bank(_),
                ..
            }) => "Bank name",
            _ => "Metric",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds a wide table from (row, column, value) triples, rejecting
/// duplicate cells.
///
/// This is the long-to-wide reshape point of the whole system, so the
/// conflict contract is explicit here rather than relying on last-write-wins
/// map inserts. Row order falls out of `RowLabel`'s ordering: canonical rank
/// for metrics, lexicographic for banks.
#[derive(Debug)]
pub struct PivotBuilder {
    columns: Vec<String>,
    rows: BTreeMap<RowLabel, Vec<Option<Decimal>>>,
}

impl PivotBuilder {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Ensures a row exists even if no value is ever set for it.
    pub fn seed_row(&mut self, label: RowLabel) {
        let width = self.columns.len();
        self.rows.entry(label).or_insert_with(|| vec![None; width]);
    }

    /// Places one value. Fails if the column is unknown or the cell already
    /// holds a value.
    pub fn set(
        &mut self,
        label: RowLabel,
        column: &str,
        value: Decimal,
    ) -> Result<(), ReportError> {
        let col = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| ReportError::UnknownColumn(column.to_string()))?;
        let width = self.columns.len();
        let cells = self
            .rows
            .entry(label.clone())
            .or_insert_with(|| vec![None; width]);
        if cells[col].is_some() {
            return Err(ReportError::PivotConflict(format!(
                "cell ('{label}', '{column}') would receive two values"
            )));
        }
        cells[col] = Some(value);
        Ok(())
    }

    pub fn build(self) -> ReportTable {
        let rows = self
            .rows
            .into_iter()
            .map(|(label, values)| ReportRow::new(label, values))
            .collect();
        ReportTable {
            columns: self.columns,
            rows,
            has_deltas: false,
        }
    }
}
