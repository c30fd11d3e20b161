//! Per-column, per-subset summaries for header and group rendering.
//!
//! - [`NumericSummary`]: box plot statistics and an equal-width histogram.
//! - [`CategoricalSummary`]: counts over a fixed category set.
//!
//! Summaries are values: built from a snapshot of row values, never updated.
//! Numeric statistics are computed lazily and memoized per instance.

mod categorical;
mod config;
mod histogram;
mod numeric;

pub use categorical::{CategoricalBin, CategoricalSummary, Category};
pub use config::{SummaryConfig, DEFAULT_WHISKER_COEF};
pub use histogram::NumberBin;
pub use numeric::{NumericSummary, Statistic, Statistics};

use thiserror::Error;

/// Invalid summary configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SummaryError {
    #[error("histogram needs at least one bin")]
    ZeroBins,
    #[error("histogram domain [{lo}, {hi}] is not a finite ascending range")]
    InvalidDomain { lo: f64, hi: f64 },
    #[error("whisker coefficient must be finite and non-negative, got {0}")]
    InvalidWhiskerCoef(f64),
}
