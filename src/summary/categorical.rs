//! Frequency histogram over a fixed, ordered category set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry of a column's category set, supplied by the host schema.
/// `name` is the stable identifier values are matched by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub label: String,
    pub color: String,
}

impl Category {
    /// A category whose label is its name.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalBin {
    pub category: String,
    pub count: usize,
}

/// Counts per category, in category-set order.
///
/// A `None` value, or a name that does not resolve to a category of the set,
/// counts as missing, so `sum(bins) + missing` always equals the number of
/// values summarized.
///
/// # Examples
/// ```
/// use u_lineup::summary::{Category, CategoricalSummary};
/// let cats = ["A", "B", "C"].map(|n| Category::new(n, "gray"));
/// let s = CategoricalSummary::new([Some("B"), Some("A"), Some("B"), None], &cats);
/// let counts: Vec<usize> = s.bins().iter().map(|b| b.count).collect();
/// assert_eq!(counts, vec![1, 2, 0]);
/// assert_eq!(s.missing(), 1);
/// assert_eq!(s.max_bin(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    bins: Vec<CategoricalBin>,
    missing: usize,
}

impl CategoricalSummary {
    pub fn new<'a, I>(values: I, categories: &[Category]) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let lookup: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();
        let mut counts = vec![0usize; categories.len()];
        let mut missing = 0;

        for value in values {
            match value.and_then(|name| lookup.get(name)) {
                Some(&i) => counts[i] += 1,
                None => missing += 1,
            }
        }

        let bins = categories
            .iter()
            .zip(counts)
            .map(|(c, count)| CategoricalBin {
                category: c.name.clone(),
                count,
            })
            .collect();
        Self { bins, missing }
    }

    /// Builds the summary of the categories read from `rows` through `value`.
    pub fn from_rows<'a, R, F>(rows: &[R], value: F, categories: &[Category]) -> Self
    where
        R: Copy,
        F: Fn(R) -> Option<&'a str>,
    {
        Self::new(rows.iter().map(|&r| value(r)), categories)
    }

    /// Bins in category-set order, one per category.
    pub fn bins(&self) -> &[CategoricalBin] {
        &self.bins
    }

    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Number of values summarized, missing included.
    pub fn count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum::<usize>() + self.missing
    }

    /// Largest bin count, or `None` for an empty category set.
    pub fn max_bin(&self) -> Option<usize> {
        self.bins.iter().map(|b| b.count).max()
    }

    /// Count of the category named `name`.
    pub fn count_of(&self, name: &str) -> Option<usize> {
        self.bins.iter().find(|b| b.category == name).map(|b| b.count)
    }
}
