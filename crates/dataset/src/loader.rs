use std::io;
use std::str::FromStr;

use core_types::{Metric, Record};
use rust_decimal::Decimal;

use crate::error::DatasetError;

/// Header of the bank identifier column in the source file.
pub const BANK_COLUMN: &str = "Bank name";
/// Header of the period identifier column in the source file.
pub const PERIOD_COLUMN: &str = "Date";

/// Parses the raw tabular source into records.
///
/// The header row is validated up front: the bank and period columns and
/// every taxonomy metric must be present, and no column may exist outside
/// the taxonomy. Both violations are configuration errors at load time, so
/// a query can never hit a metric the taxonomy does not know.
pub(crate) fn read_records(reader: impl io::Read) -> Result<Vec<Record>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut bank_idx = None;
    let mut period_idx = None;
    let mut metric_columns: Vec<(usize, Metric)> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        match header {
            BANK_COLUMN => bank_idx = Some(idx),
            PERIOD_COLUMN => period_idx = Some(idx),
            other => match Metric::from_name(other) {
                Some(metric) => metric_columns.push((idx, metric)),
                None => return Err(DatasetError::UnknownMetric(other.to_string())),
            },
        }
    }
    let bank_idx = bank_idx.ok_or(DatasetError::MissingColumn(BANK_COLUMN))?;
    let period_idx = period_idx.ok_or(DatasetError::MissingColumn(PERIOD_COLUMN))?;
    for metric in Metric::ALL {
        if !metric_columns.iter().any(|(_, m)| *m == metric) {
            return Err(DatasetError::MissingColumn(metric.name()));
        }
    }

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        // 1-based file line, accounting for the header row.
        let line = i + 2;
        let mut record = Record::new(
            row.get(bank_idx).unwrap_or("").to_string(),
            row.get(period_idx).unwrap_or(""),
        );
        for (idx, metric) in &metric_columns {
            let cell = row.get(*idx).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            let value = Decimal::from_str(cell).map_err(|_| DatasetError::InvalidValue {
                row: line,
                column: metric.name().to_string(),
                value: cell.to_string(),
            })?;
            record.values.insert(*metric, value);
        }
        records.push(record);
    }
    Ok(records)
}
