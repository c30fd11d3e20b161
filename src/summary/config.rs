//! Validated options for building numeric summaries.

use serde::{Deserialize, Serialize};

use super::SummaryError;

/// Tukey's fence multiplier for box plot whiskers.
pub const DEFAULT_WHISKER_COEF: f64 = 1.5;

/// Options for [`NumericSummary`](super::NumericSummary) construction.
///
/// - `bins`: number of histogram bins; `None` means Sturges' rule over the
///   original input length.
/// - `domain`: fixed histogram domain `[lo, hi]`; `None` means the
///   `[min, max]` of the kept values. A fixed domain makes histograms of
///   different groups comparable bin by bin.
/// - `whisker_coef`: IQR multiplier for the whisker fences.
///
/// Every constructor validates its input, so an existing `SummaryConfig` is
/// always usable. Deserialization goes through the same checks.
///
/// # Examples
/// ```
/// use u_lineup::summary::SummaryConfig;
/// let cfg = SummaryConfig::default().with_bins(10).unwrap().with_domain(0.0, 1.0).unwrap();
/// assert_eq!(cfg.bins(), Some(10));
/// assert_eq!(cfg.domain(), Some((0.0, 1.0)));
/// assert!(SummaryConfig::default().with_bins(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSummaryConfig")]
pub struct SummaryConfig {
    bins: Option<usize>,
    domain: Option<(f64, f64)>,
    whisker_coef: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            bins: None,
            domain: None,
            whisker_coef: DEFAULT_WHISKER_COEF,
        }
    }
}

impl SummaryConfig {
    /// Sets an explicit bin count.
    ///
    /// # Errors
    /// [`SummaryError::ZeroBins`] if `bins == 0`.
    pub fn with_bins(mut self, bins: usize) -> Result<Self, SummaryError> {
        if bins == 0 {
            return Err(SummaryError::ZeroBins);
        }
        self.bins = Some(bins);
        Ok(self)
    }

    /// Fixes the histogram domain to `[lo, hi]`.
    ///
    /// # Errors
    /// [`SummaryError::InvalidDomain`] if either bound is not finite or
    /// `lo > hi`.
    pub fn with_domain(mut self, lo: f64, hi: f64) -> Result<Self, SummaryError> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SummaryError::InvalidDomain { lo, hi });
        }
        self.domain = Some((lo, hi));
        Ok(self)
    }

    /// Sets the whisker fence multiplier.
    ///
    /// # Errors
    /// [`SummaryError::InvalidWhiskerCoef`] if `coef` is negative or not
    /// finite.
    pub fn with_whisker_coef(mut self, coef: f64) -> Result<Self, SummaryError> {
        if !coef.is_finite() || coef < 0.0 {
            return Err(SummaryError::InvalidWhiskerCoef(coef));
        }
        self.whisker_coef = coef;
        Ok(self)
    }

    pub fn bins(&self) -> Option<usize> {
        self.bins
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    pub fn whisker_coef(&self) -> f64 {
        self.whisker_coef
    }
}

/// Unchecked wire form of [`SummaryConfig`].
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSummaryConfig {
    bins: Option<usize>,
    domain: Option<(f64, f64)>,
    whisker_coef: f64,
}

impl Default for RawSummaryConfig {
    fn default() -> Self {
        Self {
            bins: None,
            domain: None,
            whisker_coef: DEFAULT_WHISKER_COEF,
        }
    }
}

impl TryFrom<RawSummaryConfig> for SummaryConfig {
    type Error = SummaryError;

    fn try_from(raw: RawSummaryConfig) -> Result<Self, Self::Error> {
        let mut cfg = SummaryConfig::default().with_whisker_coef(raw.whisker_coef)?;
        if let Some(bins) = raw.bins {
            cfg = cfg.with_bins(bins)?;
        }
        if let Some((lo, hi)) = raw.domain {
            cfg = cfg.with_domain(lo, hi)?;
        }
        Ok(cfg)
    }
}
