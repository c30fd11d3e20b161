//! Lazy box plot and histogram statistics for one numeric column over one
//! row subset.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use super::histogram::{Binning, NumberBin};
use super::SummaryConfig;
use crate::stats::{is_missing, number_compare, quantile_sorted, sturges_bins, CompensatedSum};

/// A derived statistic of a [`NumericSummary`], used to compare and sort
/// groups by an aggregated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Min,
    Max,
    Sum,
    Mean,
    Median,
    Q1,
    Q3,
    WhiskerLow,
    WhiskerHigh,
    Count,
    Missing,
}

/// Descriptive statistics of a numeric sequence with missing values (NaN)
/// excluded.
///
/// `min`, `max`, `sum`, and `mean` are computed in the single constructor
/// scan. Everything that needs order statistics (quantiles, whiskers,
/// outliers) or binning is computed on first read and memoized; the values
/// are sorted at most once and the sorted copy is shared by all of them.
///
/// An instance never changes. When the data, the row subset, or the column
/// changes, build a new one.
///
/// # Empty input
/// If no value survives missing-value exclusion every float statistic is
/// NaN, `sum` is 0, the histogram and outliers are empty and `max_bin` is 0.
///
/// # Examples
/// ```
/// use u_lineup::summary::NumericSummary;
/// let s = NumericSummary::new(&[1.0, 2.0, f64::NAN, 3.0, 4.0]);
/// assert_eq!(s.len(), 4);
/// assert_eq!(s.missing(), 1);
/// assert_eq!(s.median(), 2.5);
/// assert_eq!(s.min(), 1.0);
/// assert_eq!(s.max(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct NumericSummary {
    values: Vec<f64>,
    missing: usize,
    min: f64,
    max: f64,
    sum: f64,
    mean: f64,
    binning: Option<Binning>,
    whisker_coef: f64,

    sorted: OnceCell<Vec<f64>>,
    q1: OnceCell<f64>,
    median: OnceCell<f64>,
    q3: OnceCell<f64>,
    whisker_low: OnceCell<f64>,
    whisker_high: OnceCell<f64>,
    outliers: OnceCell<Vec<f64>>,
    hist: OnceCell<Vec<NumberBin>>,
    max_bin: OnceCell<usize>,
}

impl NumericSummary {
    /// Builds a summary with the default [`SummaryConfig`].
    pub fn new(values: &[f64]) -> Self {
        Self::with_config(values, &SummaryConfig::default())
    }

    /// Builds a summary of the values read from `rows` through `value`.
    pub fn from_rows<R, F>(rows: &[R], value: F, config: &SummaryConfig) -> Self
    where
        R: Copy,
        F: Fn(R) -> f64,
    {
        let values: Vec<f64> = rows.iter().map(|&r| value(r)).collect();
        Self::with_config(&values, config)
    }

    /// Builds a summary with explicit bin count, domain, and whisker
    /// coefficient.
    ///
    /// The default bin count comes from the *original* length of `values`,
    /// missing entries included.
    pub fn with_config(values: &[f64], config: &SummaryConfig) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = CompensatedSum::default();
        let kept: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| {
                if is_missing(v) {
                    return false;
                }
                min = min.min(v);
                max = max.max(v);
                sum.add(v);
                true
            })
            .collect();
        let missing = values.len() - kept.len();

        if kept.is_empty() {
            return Self::from_parts(kept, missing, f64::NAN, f64::NAN, 0.0, None, config);
        }

        let (lo, hi) = config.domain().unwrap_or((min, max));
        let bins = config.bins().unwrap_or_else(|| sturges_bins(values.len()));
        // infinite data bounds cannot be split into finite-width bins
        let binning = (lo.is_finite() && hi.is_finite()).then(|| Binning::new(lo, hi, bins));

        Self::from_parts(kept, missing, min, max, sum.total(), binning, config)
    }

    fn from_parts(
        values: Vec<f64>,
        missing: usize,
        min: f64,
        max: f64,
        sum: f64,
        binning: Option<Binning>,
        config: &SummaryConfig,
    ) -> Self {
        let mean = if values.is_empty() {
            f64::NAN
        } else {
            sum / values.len() as f64
        };
        Self {
            values,
            missing,
            min,
            max,
            sum,
            mean,
            binning,
            whisker_coef: config.whisker_coef(),
            sorted: OnceCell::new(),
            q1: OnceCell::new(),
            median: OnceCell::new(),
            q3: OnceCell::new(),
            whisker_low: OnceCell::new(),
            whisker_high: OnceCell::new(),
            outliers: OnceCell::new(),
            hist: OnceCell::new(),
            max_bin: OnceCell::new(),
        }
    }

    /// Number of kept (non-missing) values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no value survived missing-value exclusion.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Original input length: kept values plus missing ones.
    pub fn count(&self) -> usize {
        self.values.len() + self.missing
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Kept values in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Compensated sum of the kept values; 0 when empty.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Kept values sorted ascending. Sorted once, on first use.
    pub fn sorted(&self) -> &[f64] {
        self.sorted.get_or_init(|| {
            let mut sorted = self.values.clone();
            sorted.sort_unstable_by(|a, b| number_compare(*a, *b));
            sorted
        })
    }

    /// R-7 quantile of the kept values; NaN if empty or `p ∉ [0, 1]`.
    pub fn quantile(&self, p: f64) -> f64 {
        quantile_sorted(self.sorted(), p).unwrap_or(f64::NAN)
    }

    pub fn q1(&self) -> f64 {
        *self.q1.get_or_init(|| self.quantile(0.25))
    }

    pub fn median(&self) -> f64 {
        *self.median.get_or_init(|| self.quantile(0.5))
    }

    pub fn q3(&self) -> f64 {
        *self.q3.get_or_init(|| self.quantile(0.75))
    }

    /// Interquartile range `q3 - q1`.
    pub fn iqr(&self) -> f64 {
        self.q3() - self.q1()
    }

    /// Lower fence `q1 - coef * iqr`.
    pub fn fence_low(&self) -> f64 {
        self.q1() - self.whisker_coef * self.iqr()
    }

    /// Upper fence `q3 + coef * iqr`.
    pub fn fence_high(&self) -> f64 {
        self.q3() + self.whisker_coef * self.iqr()
    }

    /// Smallest kept value strictly above the lower fence, or the fence
    /// itself when no such value exists.
    pub fn whisker_low(&self) -> f64 {
        *self.whisker_low.get_or_init(|| {
            let fence = self.fence_low();
            self.sorted()
                .iter()
                .copied()
                .find(|&v| v > fence)
                .unwrap_or(fence)
        })
    }

    /// Largest kept value strictly below the upper fence, or the fence
    /// itself when no such value exists.
    pub fn whisker_high(&self) -> f64 {
        *self.whisker_high.get_or_init(|| {
            let fence = self.fence_high();
            self.sorted()
                .iter()
                .rev()
                .copied()
                .find(|&v| v < fence)
                .unwrap_or(fence)
        })
    }

    /// Kept values strictly outside `[whisker_low, whisker_high]`, ascending.
    pub fn outliers(&self) -> &[f64] {
        self.outliers.get_or_init(|| {
            let (low, high) = (self.whisker_low(), self.whisker_high());
            self.sorted()
                .iter()
                .copied()
                .filter(|&v| v < low || v > high)
                .collect()
        })
    }

    /// Histogram bins; empty when there are no kept values.
    pub fn hist(&self) -> &[NumberBin] {
        self.hist.get_or_init(|| match &self.binning {
            Some(binning) => binning.histogram(&self.values),
            None => Vec::new(),
        })
    }

    /// Largest bin count; 0 for an empty histogram.
    pub fn max_bin(&self) -> usize {
        *self
            .max_bin
            .get_or_init(|| self.hist().iter().map(|b| b.count).max().unwrap_or(0))
    }

    /// Index of the histogram bin containing `value`, for highlighting
    /// selected rows. `None` if there is no histogram or the value is
    /// missing or outside the domain.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        self.binning.as_ref().and_then(|b| b.index_of(value))
    }

    /// Reads one derived statistic. Counts are returned as floats.
    pub fn statistic(&self, statistic: Statistic) -> f64 {
        match statistic {
            Statistic::Min => self.min(),
            Statistic::Max => self.max(),
            Statistic::Sum => self.sum(),
            Statistic::Mean => self.mean(),
            Statistic::Median => self.median(),
            Statistic::Q1 => self.q1(),
            Statistic::Q3 => self.q3(),
            Statistic::WhiskerLow => self.whisker_low(),
            Statistic::WhiskerHigh => self.whisker_high(),
            Statistic::Count => self.count() as f64,
            Statistic::Missing => self.missing() as f64,
        }
    }

    /// Forces every lazy field and copies them into a plain snapshot.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            count: self.count(),
            missing: self.missing,
            min: self.min,
            max: self.max,
            mean: self.mean,
            median: self.median(),
            q1: self.q1(),
            q3: self.q3(),
            whisker_low: self.whisker_low(),
            whisker_high: self.whisker_high(),
            outliers: self.outliers().to_vec(),
            hist: self.hist().to_vec(),
            max_bin: self.max_bin(),
        }
    }
}

/// Read-only snapshot of a [`NumericSummary`] handed to renderers.
///
/// NaN fields serialize as `null` with `serde_json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
    pub hist: Vec<NumberBin>,
    pub max_bin: usize,
}
