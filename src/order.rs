//! Filtering and windowing of a row order before grouping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::column::DataSource;
use crate::stats::is_missing;

/// Keeps the rows of `rows` that pass every predicate, in order.
///
/// No predicates keeps every row.
///
/// # Examples
/// ```
/// use u_lineup::order::apply_filters;
/// let even = |r: usize| r % 2 == 0;
/// let small = |r: usize| r < 5;
/// assert_eq!(apply_filters(&[0, 1, 2, 3, 4, 5, 6], &[&even, &small]), vec![0, 2, 4]);
/// ```
pub fn apply_filters(rows: &[usize], filters: &[&dyn Fn(usize) -> bool]) -> Vec<usize> {
    rows.iter()
        .copied()
        .filter(|&row| filters.iter().all(|f| f(row)))
        .collect()
}

/// The window of `order` after skipping `skip` rows and keeping at most
/// `limit` of the rest. A window past the end is empty.
pub fn slice(order: &[usize], skip: usize, limit: Option<usize>) -> &[usize] {
    let start = skip.min(order.len());
    let end = match limit {
        Some(limit) => start.saturating_add(limit).min(order.len()),
        None => order.len(),
    };
    &order[start..end]
}

/// A value filter bound to one column.
///
/// `filter_missing` drops rows whose value is missing; otherwise missing
/// values pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnFilter {
    /// Keeps values in `[min, max]`; an absent bound is open.
    Number {
        column: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        filter_missing: bool,
    },
    /// Keeps values whose category is one of `categories`.
    Categorical {
        column: String,
        categories: HashSet<String>,
        #[serde(default)]
        filter_missing: bool,
    },
}

impl ColumnFilter {
    pub fn column(&self) -> &str {
        match self {
            ColumnFilter::Number { column, .. } | ColumnFilter::Categorical { column, .. } => column,
        }
    }

    pub fn matches<D: DataSource + ?Sized>(&self, row: usize, data: &D) -> bool {
        match self {
            ColumnFilter::Number {
                column,
                min,
                max,
                filter_missing,
            } => {
                let v = data.number(row, column);
                if is_missing(v) {
                    return !filter_missing;
                }
                min.map_or(true, |lo| v >= lo) && max.map_or(true, |hi| v <= hi)
            }
            ColumnFilter::Categorical {
                column,
                categories,
                filter_missing,
            } => match data.category(row, column) {
                Some(name) => categories.contains(name),
                None => !filter_missing,
            },
        }
    }
}

/// [`apply_filters`] over column filters reading from `data`.
pub fn apply_column_filters<D: DataSource + ?Sized>(
    rows: &[usize],
    filters: &[ColumnFilter],
    data: &D,
) -> Vec<usize> {
    rows.iter()
        .copied()
        .filter(|&row| filters.iter().all(|f| f.matches(row, data)))
        .collect()
}
