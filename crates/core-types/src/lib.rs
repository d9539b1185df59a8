//! # Core Types
//!
//! The Layer 0 crate of the reporting workspace: the metric taxonomy and the
//! raw-record data model every other crate builds on.
//!
//! ## Architectural Principles
//!
//! - **No upward dependencies:** this crate depends on nothing else in the
//!   workspace. Everything above it (the reporting engine, the dataset
//!   loader, the exporter) speaks in these types.
//! - **Closed taxonomy:** `Metric` is a closed enum declared in canonical
//!   display order. Membership in exactly one group and a single stable rank
//!   per metric are therefore compile-time facts, not runtime configuration.

pub mod error;
pub mod record;
pub mod taxonomy;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use record::{Period, Record};
pub use taxonomy::{AggregationKind, Metric, MetricGroup};
