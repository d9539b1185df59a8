//! # Dataset
//!
//! Loads the raw input records from their tabular source, exactly once per
//! process.
//!
//! ## Architectural Principles
//!
//! - **Load once, read many:** a `Dataset` is constructed at startup and is
//!   immutable afterwards. There is no global singleton and no cache
//!   invalidation; a process restart is the only refresh mechanism.
//! - **Fail at the door:** header validation happens at load time. Missing
//!   or unknown columns never survive into query handling.

use std::fs::File;
use std::io;
use std::path::Path;

use core_types::{Period, Record};

pub mod error;
mod loader;

pub use error::DatasetError;
pub use loader::{BANK_COLUMN, PERIOD_COLUMN};

/// The immutable collection of loaded input records, together with the
/// distinct banks and periods they mention (in first-seen order) for the
/// selection surfaces.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    banks: Vec<String>,
    periods: Vec<Period>,
}

impl Dataset {
    /// Reads and validates the CSV source at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.records.len(),
            banks = dataset.banks.len(),
            periods = dataset.periods.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Reads and validates CSV data from any reader.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, DatasetError> {
        Ok(Self::from_records(loader::read_records(reader)?))
    }

    /// Wraps already-built records, cataloguing their banks and periods.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut banks: Vec<String> = Vec::new();
        let mut periods: Vec<Period> = Vec::new();
        for record in &records {
            if !banks.contains(&record.bank) {
                banks.push(record.bank.clone());
            }
            if !periods.contains(&record.period) {
                periods.push(record.period.clone());
            }
        }
        Self {
            records,
            banks,
            periods,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct bank names, in first-seen order.
    pub fn banks(&self) -> &[String] {
        &self.banks
    }

    /// Distinct periods, in first-seen order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
