//! Numeric primitives shared by the summaries, the rank assigner, and the
//! group comparator.
//!
//! # Algorithms
//!
//! - **Sum**: Neumaier compensated summation for O(ε) error independent of n.
//! - **Quantile**: R-7 linear interpolation (default in R, NumPy, d3).
//!   Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//!   Packages", *The American Statistician* 50(4).
//! - **Bin count**: Sturges (1926), `⌈log₂ n⌉ + 1`.
//!
//! # Missing values
//!
//! A missing number is any NaN. [`number_compare`] is the single total order
//! used everywhere a float is sorted or compared: NaNs are equal to each
//! other and greater than every number, so they sort last in ascending order.

use std::cmp::Ordering;

/// Returns `true` if `value` is the missing-number marker (NaN).
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Total order over `f64` with missing values last.
///
/// - Two NaNs compare `Equal`.
/// - NaN compares `Greater` than any number, including `+∞`.
/// - `-0.0` and `0.0` compare `Equal`.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use u_lineup::stats::number_compare;
/// assert_eq!(number_compare(1.0, 2.0), Ordering::Less);
/// assert_eq!(number_compare(f64::NAN, f64::INFINITY), Ordering::Greater);
/// assert_eq!(number_compare(f64::NAN, f64::NAN), Ordering::Equal);
/// ```
pub fn number_compare(a: f64, b: f64) -> Ordering {
    match (is_missing(a), is_missing(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Computes the `p`-th quantile on **pre-sorted** data (R-7 method).
///
/// # Algorithm
/// For sorted data `x[0..n]` and quantile `p ∈ [0, 1]`:
/// 1. Compute `h = (n − 1) × p`
/// 2. Let `j = ⌊h⌋` and `g = h − j`
/// 3. Return `(1 − g) × x[j] + g × x[j+1]`
///
/// The caller must guarantee that `sorted_data` is sorted in non-decreasing
/// order and free of NaN.
///
/// # Returns
/// - `None` if `sorted_data` is empty or `p` is outside `[0, 1]`.
///
/// # Examples
/// ```
/// use u_lineup::stats::quantile_sorted;
/// assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
/// assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0], 0.5), Some(2.0));
/// assert_eq!(quantile_sorted(&[], 0.5), None);
/// ```
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    let n = sorted_data.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_data[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted_data[n - 1])
    } else {
        Some((1.0 - g) * sorted_data[j] + g * sorted_data[j + 1])
    }
}

/// Neumaier compensated summation.
///
/// Improved Kahan summation that also handles an addend larger in
/// magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = CompensatedSum::default();
    for &x in data {
        acc.add(x);
    }
    acc.total()
}

/// Running Neumaier sum, for callers that fold values one at a time while
/// doing other work in the same scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    c: f64,
}

impl CompensatedSum {
    /// Adds one value.
    pub fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    /// Returns the compensated total.
    pub fn total(&self) -> f64 {
        self.sum + self.c
    }
}

/// Default histogram bin count by Sturges' rule: `⌈log₂ n⌉ + 1`.
///
/// `n` is the length of the *original* input, missing values included, so
/// that columns of the same ranking get the same number of bins.
/// Returns 1 for `n <= 1`.
///
/// # Examples
/// ```
/// use u_lineup::stats::sturges_bins;
/// assert_eq!(sturges_bins(1), 1);
/// assert_eq!(sturges_bins(8), 4);
/// assert_eq!(sturges_bins(9), 5);
/// ```
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Rounds `v` to `precision` decimal places.
///
/// # Examples
/// ```
/// use u_lineup::stats::round;
/// assert_eq!(round(2.346, 2), 2.35);
/// assert_eq!(round(2.5, 0), 3.0);
/// ```
pub fn round(v: f64, precision: u32) -> f64 {
    if precision == 0 {
        return v.round();
    }
    let scale = 10f64.powi(precision as i32);
    (v * scale).round() / scale
}

/// Returns `true` if `a` and `b` differ by less than `delta`.
pub fn similar(a: f64, b: f64, delta: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() < delta
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- number_compare ---

    #[test]
    fn test_number_compare_numbers() {
        assert_eq!(number_compare(1.0, 2.0), Ordering::Less);
        assert_eq!(number_compare(2.0, 1.0), Ordering::Greater);
        assert_eq!(number_compare(-0.0, 0.0), Ordering::Equal);
    }

    #[test]
    fn test_number_compare_missing_last() {
        assert_eq!(number_compare(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(number_compare(1.0, f64::NAN), Ordering::Less);
        assert_eq!(number_compare(f64::NAN, f64::INFINITY), Ordering::Greater);
        assert_eq!(number_compare(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_number_compare_sorts_nan_last() {
        let mut v = vec![3.0, f64::NAN, 1.0, f64::NEG_INFINITY, 2.0];
        v.sort_by(|a, b| number_compare(*a, *b));
        assert_eq!(&v[..4], &[f64::NEG_INFINITY, 1.0, 2.0, 3.0]);
        assert!(v[4].is_nan());
    }

    // --- quantile_sorted ---

    #[test]
    fn test_quantile_even_odd_median() {
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0], 0.5), Some(2.0));
    }

    #[test]
    fn test_quantile_interpolation() {
        // h = (4-1)*0.25 = 0.75, j=0, g=0.75
        let q = quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.25).unwrap();
        assert!((q - 1.75).abs() < 1e-15);
    }

    #[test]
    fn test_quantile_extremes_and_invalid() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(5.0));
        assert_eq!(quantile_sorted(&data, -0.1), None);
        assert_eq!(quantile_sorted(&data, 1.1), None);
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[42.0], 0.3), Some(42.0));
    }

    // --- compensated sum ---

    #[test]
    fn test_kahan_sum_precision() {
        // naive summation loses the 1.0
        let result = kahan_sum(&[1e16, 1.0, -1e16]);
        assert!((result - 1.0).abs() < 1e-10, "got {result}");
    }

    #[test]
    fn test_compensated_sum_matches_batch() {
        let data = [0.1, 0.2, 0.3, 1e10, -1e10];
        let mut acc = CompensatedSum::default();
        data.iter().for_each(|&x| acc.add(x));
        assert_eq!(acc.total(), kahan_sum(&data));
    }

    // --- sturges_bins ---

    #[test]
    fn test_sturges() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(2), 2);
        assert_eq!(sturges_bins(100), 8);
        assert_eq!(sturges_bins(1024), 11);
    }

    // --- round / similar ---

    #[test]
    fn test_round() {
        assert_eq!(round(1.2346, 3), 1.235);
        assert_eq!(round(-1.5, 0), -2.0);
    }

    #[test]
    fn test_similar() {
        assert!(similar(1.0, 1.4, 0.5));
        assert!(!similar(1.0, 1.5, 0.5));
        assert!(similar(f64::INFINITY, f64::INFINITY, 0.5));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e9_f64..1e9, min_len..=max_len).prop_map(|mut v| {
            v.sort_by(|a, b| number_compare(*a, *b));
            v
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn quantiles_monotonic(
            data in sorted_finite_vec(1, 100),
            p1 in 0.0_f64..=1.0,
            p2 in 0.0_f64..=1.0,
        ) {
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let q_lo = quantile_sorted(&data, lo).unwrap();
            let q_hi = quantile_sorted(&data, hi).unwrap();
            prop_assert!(q_lo <= q_hi + 1e-6, "quantiles should be monotonic");
        }

        #[test]
        fn quantile_within_range(data in sorted_finite_vec(1, 100), p in 0.0_f64..=1.0) {
            let q = quantile_sorted(&data, p).unwrap();
            prop_assert!(q >= data[0] - 1e-6 && q <= data[data.len() - 1] + 1e-6);
        }

        #[test]
        fn number_compare_is_antisymmetric(
            a in prop_oneof![Just(f64::NAN), -1e6_f64..1e6],
            b in prop_oneof![Just(f64::NAN), -1e6_f64..1e6],
        ) {
            prop_assert_eq!(number_compare(a, b), number_compare(b, a).reverse());
        }
    }
}
