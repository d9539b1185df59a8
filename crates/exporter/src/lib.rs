//! # Exporter
//!
//! Serializes report tables into downloadable spreadsheet payloads: a
//! single-sheet `.xlsx` workbook with row labels in the leftmost column,
//! one column per table column, and the delta columns when present.
//!
//! Like the reporting engine, this crate is a pure transformation: it
//! produces an in-memory byte payload and leaves writing it to disk (or
//! serving it for download) to the caller.

use reporting::ReportTable;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;

pub mod error;

pub use error::ExportError;

/// Which of the user-facing reports is being exported. Determines the sheet
/// name inside the workbook and the suggested file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Industry overview, one period or three-plus periods.
    Filtered,
    /// Industry overview across exactly two compared periods.
    Comparison,
    /// Cross-bank comparison for a single period.
    BankComparison,
    /// Per-metric breakdown across periods.
    MetricBreakdown,
}

impl ReportKind {
    pub fn sheet_name(self) -> &'static str {
        match self {
            ReportKind::Filtered => "Filtered Report",
            ReportKind::Comparison => "Comparison Report",
            ReportKind::BankComparison => "Bank Comparison Report",
            ReportKind::MetricBreakdown => "Metric Breakdown Report",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::Filtered => "filtered_report.xlsx",
            ReportKind::Comparison => "comparison_report.xlsx",
            ReportKind::BankComparison => "bank_comparison_report.xlsx",
            ReportKind::MetricBreakdown => "metric_breakdown_report.xlsx",
        }
    }
}

/// A finished export: the workbook bytes plus the file name to deliver them
/// under.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Renders `table` into a single-sheet workbook.
///
/// Missing values and undefined percentage changes are written as blank
/// cells, matching how the terminal renderer displays them.
pub fn export_table(table: &ReportTable, kind: ReportKind) -> Result<ExportPayload, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(kind.sheet_name())?;

    sheet.write_string(0, 0, table.label_header())?;
    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string(0, col as u16 + 1, name)?;
    }
    let delta_base = table.columns.len() as u16 + 1;
    if table.has_deltas {
        sheet.write_string(0, delta_base, "Change")?;
        sheet.write_string(0, delta_base + 1, "Percentage Change")?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let excel_row = i as u32 + 1;
        sheet.write_string(excel_row, 0, row.label.to_string())?;
        for (col, value) in row.values.iter().enumerate() {
            if let Some(value) = value {
                sheet.write_number(excel_row, col as u16 + 1, to_cell(*value)?)?;
            }
        }
        if table.has_deltas {
            if let Some(change) = row.change {
                sheet.write_number(excel_row, delta_base, to_cell(change)?)?;
            }
            if let Some(pct) = row.pct_change {
                sheet.write_number(excel_row, delta_base + 1, to_cell(pct)?)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(
        file = kind.file_name(),
        rows = table.rows.len(),
        bytes = bytes.len(),
        "built spreadsheet payload"
    );
    Ok(ExportPayload {
        file_name: kind.file_name(),
        bytes,
    })
}

fn to_cell(value: Decimal) -> Result<f64, ExportError> {
    value
        .to_f64()
        .ok_or_else(|| ExportError::Numeric(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Metric;
    use reporting::{PivotBuilder, ReportEngine, RowLabel};
    use rust_decimal_macros::dec;

    fn sample_table() -> ReportTable {
        let mut builder =
            PivotBuilder::new(vec!["2023Q1".to_string(), "2023Q2".to_string()]);
        builder
            .set(RowLabel::Metric(Metric::TotalAssets), "2023Q1", dec!(0))
            .unwrap();
        builder
            .set(RowLabel::Metric(Metric::TotalAssets), "2023Q2", dec!(150))
            .unwrap();
        builder.seed_row(RowLabel::Metric(Metric::Roe));
        builder.build()
    }

    #[test]
    fn payload_is_a_workbook_with_the_expected_file_name() {
        let payload = export_table(&sample_table(), ReportKind::Filtered).unwrap();
        assert_eq!(payload.file_name, "filtered_report.xlsx");
        // .xlsx files are zip archives.
        assert!(payload.bytes.starts_with(b"PK"));
    }

    /// Undefined percentage change (zero base) must export without error,
    /// as a blank cell rather than a sentinel number.
    #[test]
    fn tables_with_deltas_and_undefined_cells_export_cleanly() {
        let engine = ReportEngine::new();
        let compared = engine.compare_columns(&sample_table(), "2023Q1", "2023Q2");
        assert!(compared.has_deltas);
        assert_eq!(compared.rows[0].pct_change, None);

        let payload = export_table(&compared, ReportKind::Comparison).unwrap();
        assert_eq!(payload.file_name, "comparison_report.xlsx");
        assert!(!payload.bytes.is_empty());
    }

    #[test]
    fn each_view_gets_its_own_sheet_and_file() {
        assert_eq!(ReportKind::BankComparison.sheet_name(), "Bank Comparison Report");
        assert_eq!(
            ReportKind::BankComparison.file_name(),
            "bank_comparison_report.xlsx"
        );
        assert_eq!(
            ReportKind::MetricBreakdown.sheet_name(),
            "Metric Breakdown Report"
        );
    }
}
