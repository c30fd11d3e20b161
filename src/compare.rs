//! Comparison of row groups by an aggregated statistic.
//!
//! Each side is summarized independently with a [`NumericSummary`]; the
//! chosen [`Statistic`] is read from both and compared with
//! [`number_compare`], so a group whose statistic is missing (NaN) sorts
//! after every group with a number.

use std::cmp::Ordering;

pub use crate::summary::Statistic;

use crate::group::OrderedGroup;
use crate::stats::{is_missing, number_compare};
use crate::summary::{NumericSummary, SummaryConfig};

/// Compares two row subsets by `statistic` of the values `accessor` reads.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use u_lineup::compare::{compare_groups, Statistic};
/// let values = [1.0, 2.0, 3.0, 10.0, 20.0];
/// let low = [0usize, 1, 2];
/// let high = [3usize, 4];
/// let ord = compare_groups(&low, &high, |r| values[r], Statistic::Median);
/// assert_eq!(ord, Ordering::Less);
/// ```
pub fn compare_groups<R, F>(rows_a: &[R], rows_b: &[R], accessor: F, statistic: Statistic) -> Ordering
where
    R: Copy,
    F: Fn(R) -> f64,
{
    let a = group_statistic(rows_a, &accessor, statistic);
    let b = group_statistic(rows_b, &accessor, statistic);
    number_compare(a, b)
}

fn group_statistic<R, F>(rows: &[R], accessor: &F, statistic: Statistic) -> f64
where
    R: Copy,
    F: Fn(R) -> f64,
{
    NumericSummary::from_rows(rows, accessor, &SummaryConfig::default()).statistic(statistic)
}

/// Sorts groups by `statistic` of their rows, ascending unless `descending`.
///
/// The sort is stable: groups that compare equal keep their current order.
/// Each group is summarized once. Missing statistics stay last in both
/// directions.
pub fn sort_groups<F>(groups: &mut [OrderedGroup], accessor: F, statistic: Statistic, descending: bool)
where
    F: Fn(usize) -> f64,
{
    let keys: Vec<f64> = groups
        .iter()
        .map(|g| group_statistic(&g.order, &accessor, statistic))
        .collect();
    let mut slots: Vec<usize> = (0..groups.len()).collect();
    slots.sort_by(|&a, &b| {
        let (ka, kb) = (keys[a], keys[b]);
        match (is_missing(ka), is_missing(kb)) {
            (false, false) if descending => number_compare(kb, ka),
            _ => number_compare(ka, kb),
        }
    });

    let sorted: Vec<OrderedGroup> = slots.iter().map(|&i| groups[i].clone()).collect();
    for (slot, group) in groups.iter_mut().zip(sorted) {
        *slot = group;
    }
}

/// The row holding the median of the non-missing values.
///
/// Rows are ordered by their value (ties keep input order) and the row at
/// index `n / 2` is returned, so for an even count this is the upper of the
/// two middle rows. `None` when every row is missing.
pub fn median_row<R, F>(rows: &[R], accessor: F) -> Option<R>
where
    R: Copy,
    F: Fn(R) -> f64,
{
    let mut keyed: Vec<(f64, R)> = rows
        .iter()
        .map(|&r| (accessor(r), r))
        .filter(|(v, _)| !is_missing(*v))
        .collect();
    if keyed.is_empty() {
        return None;
    }
    keyed.sort_by(|a, b| number_compare(a.0, b.0));
    Some(keyed[keyed.len() / 2].1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupArena;

    const VALUES: [f64; 8] = [1.0, 2.0, 3.0, 10.0, 20.0, f64::NAN, f64::NAN, 5.0];

    #[test]
    fn test_compare_by_median() {
        let acc = |r: usize| VALUES[r];
        assert_eq!(compare_groups(&[0, 1, 2], &[3, 4], acc, Statistic::Median), Ordering::Less);
        assert_eq!(compare_groups(&[3, 4], &[0, 1, 2], acc, Statistic::Median), Ordering::Greater);
        assert_eq!(compare_groups(&[0, 1, 2], &[2, 1, 0], acc, Statistic::Median), Ordering::Equal);
    }

    #[test]
    fn test_statistic_selects_field() {
        let acc = |r: usize| VALUES[r];
        // [1, 2, 20] vs [3, 5, 10]: lower median, higher max
        let a = [0, 1, 4];
        let b = [2, 7, 3];
        assert_eq!(compare_groups(&a, &b, acc, Statistic::Median), Ordering::Less);
        assert_eq!(compare_groups(&a, &b, acc, Statistic::Max), Ordering::Greater);
        assert_eq!(compare_groups(&a, &b, acc, Statistic::Count), Ordering::Equal);
        assert_eq!(compare_groups(&a, &[0, 5], acc, Statistic::Missing), Ordering::Less);
    }

    #[test]
    fn test_missing_sorts_greater() {
        let acc = |r: usize| VALUES[r];
        assert_eq!(compare_groups(&[5, 6], &[0], acc, Statistic::Median), Ordering::Greater);
        assert_eq!(compare_groups(&[0], &[5], acc, Statistic::Mean), Ordering::Less);
        assert_eq!(compare_groups(&[5], &[6], acc, Statistic::Median), Ordering::Equal);
        assert_eq!(compare_groups::<usize, _>(&[], &[], acc, Statistic::Median), Ordering::Equal);
    }

    fn groups(orders: &[&[usize]]) -> (GroupArena, Vec<OrderedGroup>) {
        let mut arena = GroupArena::new();
        let groups = orders
            .iter()
            .enumerate()
            .map(|(i, order)| OrderedGroup {
                group: arena.insert(format!("g{i}"), "gray"),
                order: order.to_vec(),
            })
            .collect();
        (arena, groups)
    }

    #[test]
    fn test_sort_groups() {
        let (arena, mut gs) = groups(&[&[3, 4], &[5, 6], &[0, 1], &[2, 7]]);
        sort_groups(&mut gs, |r| VALUES[r], Statistic::Median, false);
        let names: Vec<&str> = gs.iter().map(|g| arena.name(g.group)).collect();
        assert_eq!(names, vec!["g2", "g3", "g0", "g1"]);

        sort_groups(&mut gs, |r| VALUES[r], Statistic::Median, true);
        let names: Vec<&str> = gs.iter().map(|g| arena.name(g.group)).collect();
        assert_eq!(names, vec!["g0", "g3", "g2", "g1"]);
    }

    #[test]
    fn test_sort_groups_is_stable() {
        let (arena, mut gs) = groups(&[&[1], &[0, 2], &[1]]);
        sort_groups(&mut gs, |r| VALUES[r], Statistic::Median, false);
        let names: Vec<&str> = gs.iter().map(|g| arena.name(g.group)).collect();
        assert_eq!(names, vec!["g0", "g1", "g2"]);
    }

    #[test]
    fn test_median_row() {
        let acc = |r: usize| VALUES[r];
        assert_eq!(median_row(&[4, 0, 2], acc), Some(2));
        // even count picks the upper middle
        assert_eq!(median_row(&[0, 1, 2, 3], acc), Some(2));
        assert_eq!(median_row(&[5, 0, 6], acc), Some(0));
        assert_eq!(median_row(&[5, 6], acc), None);
        assert_eq!(median_row::<usize, _>(&[], acc), None);
    }
}
