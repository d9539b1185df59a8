//! # Reporting Engine
//!
//! This crate turns raw per-bank-per-period records into the aggregated,
//! comparative and breakdown tables the rest of the system renders and
//! exports.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files, terminals or spreadsheets. It depends only on `core-types`
//!   (Layer 0).
//! - **Stateless Calculation:** The `ReportEngine` is a stateless
//!   calculator. Every operation is a pure function of its explicit inputs
//!   plus the static metric taxonomy, which makes it highly reliable and
//!   easy to test.
//! - **Explicit reshaping:** The long-to-wide pivot goes through
//!   `PivotBuilder`, which rejects duplicate cells instead of silently
//!   keeping the last write.
//!
//! ## Public API
//!
//! - `ReportEngine`: aggregation, metric selection, two-column deltas,
//!   cross-bank comparison and per-metric breakdown.
//! - `ReportTable` / `ReportRow` / `RowLabel`: the wide-table value types
//!   every operation returns.
//! - `ReportError`: the specific error types that can be returned from this
//!   crate.

// Declare the modules that constitute this crate.
pub mod change;
pub mod engine;
pub mod error;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use engine::ReportEngine;
pub use error::ReportError;
pub use table::{PivotBuilder, ReportRow, ReportTable, RowLabel};
