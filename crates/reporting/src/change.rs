use rust_decimal::Decimal;

use crate::engine::ReportEngine;
use crate::table::{ReportRow, ReportTable};

impl ReportEngine {
    /// Restricts `table` to exactly `[col_a, col_b]` and appends per-row
    /// `Change` and `Percentage Change` figures.
    ///
    /// `Change = col_b - col_a`; `Percentage Change = Change / col_a * 100`.
    /// A zero or missing base leaves `pct_change` as `None`, the undefined
    /// marker rendered blank downstream. It is never an arithmetic failure.
    ///
    /// If either column is missing the input table is returned unchanged.
    /// That silent no-op is how "fewer than two periods selected" flows
    /// through every view, so callers read `has_deltas` on the result rather
    /// than assuming the calculation ran.
    pub fn compare_columns(&self, table: &ReportTable, col_a: &str, col_b: &str) -> ReportTable {
        let (Some(a), Some(b)) = (table.column_index(col_a), table.column_index(col_b)) else {
            tracing::debug!(col_a, col_b, "comparison column missing, leaving table as-is");
            return table.clone();
        };

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let base = row.values[a];
                let other = row.values[b];
                let change = match (base, other) {
                    (Some(base), Some(other)) => Some(other - base),
                    _ => None,
                };
                let pct_change = match (change, base) {
                    (Some(change), Some(base)) if !base.is_zero() => {
                        Some(change / base * Decimal::from(100))
                    }
                    _ => None,
                };
                ReportRow {
                    label: row.label.clone(),
                    values: vec![base, other],
                    change,
                    pct_change,
                }
            })
            .collect();

        ReportTable {
            columns: vec![col_a.to_string(), col_b.to_string()],
            rows,
            has_deltas: true,
        }
    }
}
