//! Competition ranks for an already sorted row order.
//!
//! Tied rows share the lowest rank of their run and the next distinct value
//! gets its 1-based position, so ranks skip after ties: `1, 1, 3, 4`, not
//! `1, 1, 2, 3`. The assigner never sorts; it stamps ranks consistent with
//! the order it is given.

use std::cmp::Ordering;

use crate::stats::number_compare;

/// Stamps competition ranks onto `rows`.
///
/// `accessor(row, position)` yields the key the rows are sorted by;
/// `sink(row, rank)` receives each row's rank. A row whose key equals the
/// previous row's key keeps the previous rank; otherwise its rank is its
/// 1-based position in `rows`. Empty input writes nothing.
///
/// Keys are compared with `PartialEq`, so for floats every NaN starts a new
/// rank; use [`assign_number_ranks`] to let missing values tie.
///
/// # Examples
/// ```
/// use u_lineup::rank::assign_ranks;
/// let values = [5, 5, 3, 1, 1, 1];
/// let mut ranks = vec![0; values.len()];
/// assign_ranks(&[0, 1, 2, 3, 4, 5], |row: usize, _| values[row], |row, rank| ranks[row] = rank);
/// assert_eq!(ranks, vec![1, 1, 3, 4, 4, 4]);
/// ```
pub fn assign_ranks<R, K, A, S>(rows: &[R], accessor: A, sink: S)
where
    R: Copy,
    K: PartialEq,
    A: FnMut(R, usize) -> K,
    S: FnMut(R, usize),
{
    assign_ranks_by(rows, accessor, |a, b| a == b, sink);
}

/// [`assign_ranks`] for float keys, comparing with
/// [`number_compare`](crate::stats::number_compare) so that consecutive
/// missing values share a rank.
pub fn assign_number_ranks<R, A, S>(rows: &[R], accessor: A, sink: S)
where
    R: Copy,
    A: FnMut(R, usize) -> f64,
    S: FnMut(R, usize),
{
    assign_ranks_by(
        rows,
        accessor,
        |a, b| number_compare(*a, *b) == Ordering::Equal,
        sink,
    );
}

/// Ranks rows by position only: `1..=n`, no ties.
pub fn assign_positional_ranks<R, S>(rows: &[R], sink: S)
where
    R: Copy,
    S: FnMut(R, usize),
{
    assign_ranks(rows, |_, position| position, sink);
}

fn assign_ranks_by<R, K, A, E, S>(rows: &[R], mut accessor: A, mut same: E, mut sink: S)
where
    R: Copy,
    A: FnMut(R, usize) -> K,
    E: FnMut(&K, &K) -> bool,
    S: FnMut(R, usize),
{
    let mut previous: Option<K> = None;
    let mut rank = 1;
    for (i, &row) in rows.iter().enumerate() {
        let key = accessor(row, i);
        if let Some(prev) = &previous {
            if !same(prev, &key) {
                rank = i + 1;
            }
        }
        sink(row, rank);
        previous = Some(key);
    }
}

/// Rank values of the synthetic rank column, indexed by row.
///
/// Rows never ranked (filtered out, or beyond the table size) report `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankColumn {
    ranks: Vec<Option<usize>>,
}

impl RankColumn {
    /// A rank column for a table of `rows` rows.
    pub fn new(rows: usize) -> Self {
        Self {
            ranks: vec![None; rows],
        }
    }

    /// Clears previous ranks and ranks `order` by `accessor`.
    pub fn assign<K, A>(&mut self, order: &[usize], accessor: A)
    where
        K: PartialEq,
        A: FnMut(usize, usize) -> K,
    {
        self.ranks.iter_mut().for_each(|r| *r = None);
        let ranks = &mut self.ranks;
        assign_ranks(order, accessor, |row, rank| Self::store(ranks, row, rank));
    }

    /// Clears previous ranks and ranks `order` by a float key.
    pub fn assign_numbers<A>(&mut self, order: &[usize], accessor: A)
    where
        A: FnMut(usize, usize) -> f64,
    {
        self.ranks.iter_mut().for_each(|r| *r = None);
        let ranks = &mut self.ranks;
        assign_number_ranks(order, accessor, |row, rank| Self::store(ranks, row, rank));
    }

    fn store(ranks: &mut Vec<Option<usize>>, row: usize, rank: usize) {
        if row >= ranks.len() {
            ranks.resize(row + 1, None);
        }
        ranks[row] = Some(rank);
    }

    pub fn rank(&self, row: usize) -> Option<usize> {
        self.ranks.get(row).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn ranks_match_count_of_strictly_better(raw in proptest::collection::vec(0_i32..10, 0..50)) {
            let mut keys = raw;
            keys.sort_unstable_by(|a, b| b.cmp(a));
            let positions: Vec<usize> = (0..keys.len()).collect();
            let mut ranks = vec![0; keys.len()];
            assign_ranks(&positions, |row, _| keys[row], |row, rank| ranks[row] = rank);
            for (i, &rank) in ranks.iter().enumerate() {
                let better = keys.iter().filter(|&&k| k > keys[i]).count();
                prop_assert_eq!(rank, better + 1);
            }
        }
    }
}
