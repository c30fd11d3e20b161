//! Equal-width histogram binning.

use serde::{Deserialize, Serialize};

/// One histogram bin: the half-open interval `[lower, upper)` and the number
/// of values that fall into it. The last bin of a histogram also contains
/// its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bin edges over a fixed domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Binning {
    lo: f64,
    hi: f64,
    bins: usize,
}

impl Binning {
    /// `bins` must be at least 1 and `lo <= hi`, both finite.
    pub(crate) fn new(lo: f64, hi: f64, bins: usize) -> Self {
        debug_assert!(bins >= 1);
        debug_assert!(lo <= hi);
        // a zero-width domain has exactly one meaningful interval
        let bins = if lo == hi { 1 } else { bins.max(1) };
        Self { lo, hi, bins }
    }

    fn width(&self) -> f64 {
        (self.hi - self.lo) / self.bins as f64
    }

    /// Index of the bin containing `value`, or `None` if it lies outside
    /// the domain or is missing.
    pub(crate) fn index_of(&self, value: f64) -> Option<usize> {
        if value.is_nan() || value < self.lo || value > self.hi {
            return None;
        }
        if self.lo == self.hi {
            return Some(0);
        }
        let i = ((value - self.lo) / self.width()).floor() as usize;
        // rounding and the inclusive upper edge both land past the end
        Some(i.min(self.bins - 1))
    }

    /// Counts `values` into bins.
    pub(crate) fn histogram(&self, values: &[f64]) -> Vec<NumberBin> {
        let width = self.width();
        let mut hist: Vec<NumberBin> = (0..self.bins)
            .map(|i| NumberBin {
                lower: self.lo + i as f64 * width,
                upper: if i + 1 == self.bins {
                    self.hi
                } else {
                    self.lo + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();
        for &v in values {
            if let Some(i) = self.index_of(v) {
                hist[i].count += 1;
            }
        }
        hist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_partition_domain() {
        let hist = Binning::new(0.0, 10.0, 4).histogram(&[]);
        assert_eq!(hist.len(), 4);
        assert_eq!(hist[0].lower, 0.0);
        assert_eq!(hist[3].upper, 10.0);
        for pair in hist.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn test_half_open_with_inclusive_last() {
        let b = Binning::new(0.0, 4.0, 4);
        assert_eq!(b.index_of(0.0), Some(0));
        assert_eq!(b.index_of(1.0), Some(1));
        assert_eq!(b.index_of(3.999), Some(3));
        assert_eq!(b.index_of(4.0), Some(3));
        assert_eq!(b.index_of(4.1), None);
        assert_eq!(b.index_of(-0.1), None);
        assert_eq!(b.index_of(f64::NAN), None);
    }

    #[test]
    fn test_degenerate_domain_single_bin() {
        let hist = Binning::new(2.0, 2.0, 5).histogram(&[2.0, 2.0, 3.0]);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].count, 2);
        assert_eq!((hist[0].lower, hist[0].upper), (2.0, 2.0));
    }

    #[test]
    fn test_counts() {
        let hist = Binning::new(0.0, 1.0, 2).histogram(&[0.0, 0.2, 0.5, 0.7, 1.0]);
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist[1].count, 3);
    }
}
