use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::taxonomy::Metric;

/// A reporting period identifier (e.g. "2023Q1" or a statement date).
///
/// Periods are opaque categorical keys. They are compared only for equality
/// and lexicographic ordering; nothing in the system interprets them as
/// calendar dates.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    pub fn new(id: impl Into<String>) -> Self {
        Period(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Period {
    fn from(id: &str) -> Self {
        Period(id.to_string())
    }
}

impl From<String> for Period {
    fn from(id: String) -> Self {
        Period(id)
    }
}

impl FromStr for Period {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Period(s.to_string()))
    }
}

/// One row of raw input data: a bank's reported figures for one period.
///
/// The value map is sparse. A metric missing from the map means the bank did
/// not report that figure for the period; it is never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub bank: String,
    pub period: Period,
    pub values: BTreeMap<Metric, Decimal>,
}

impl Record {
    pub fn new(bank: impl Into<String>, period: impl Into<Period>) -> Self {
        Self {
            bank: bank.into(),
            period: period.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly useful when assembling fixtures.
    pub fn with_value(mut self, metric: Metric, value: Decimal) -> Self {
        self.values.insert(metric, value);
        self
    }

    /// The reported value for `metric`, if the bank reported one.
    pub fn value(&self, metric: Metric) -> Option<Decimal> {
        self.values.get(&metric).copied()
    }
}
