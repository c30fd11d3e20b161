//! Cross-instance memoization of column summaries.
//!
//! Summaries never update themselves. A host that re-renders headers keeps
//! one [`SummaryCache`] per ranking, bumps the data version when rows,
//! filters, or grouping change, and rebuilds only the summaries it asks for.

use std::collections::HashMap;

use crate::column::ColumnSummary;

/// Summaries keyed by `(column id, group id)` for one data version.
///
/// # Examples
/// ```
/// use u_lineup::cache::SummaryCache;
/// let mut cache: SummaryCache<usize> = SummaryCache::new();
/// let mut builds = 0;
/// for _ in 0..3 {
///     cache.get_or_compute("score", "Default", || { builds += 1; 42 });
/// }
/// assert_eq!(builds, 1);
/// cache.set_version(1);
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SummaryCache<V = ColumnSummary> {
    version: u64,
    entries: HashMap<(String, String), V>,
}

impl<V> Default for SummaryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SummaryCache<V> {
    /// An empty cache at version 0.
    pub fn new() -> Self {
        Self {
            version: 0,
            entries: HashMap::new(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Moves the cache to data version `version`, dropping every entry if it
    /// differs from the current one.
    pub fn set_version(&mut self, version: u64) {
        if version != self.version {
            self.version = version;
            self.entries.clear();
        }
    }

    /// The cached value for `(column, group)`, building it with `compute` on
    /// a miss.
    pub fn get_or_compute<F>(&mut self, column: &str, group: &str, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        self.entries
            .entry((column.to_owned(), group.to_owned()))
            .or_insert_with(compute)
    }

    pub fn get(&self, column: &str, group: &str) -> Option<&V> {
        self.entries.get(&(column.to_owned(), group.to_owned()))
    }

    /// Drops every group's entry for `column`. Returns how many were removed.
    pub fn invalidate_column(&mut self, column: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(c, _), _| c != column);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::NumericSummary;

    #[test]
    fn test_computes_once_per_key() {
        let mut cache: SummaryCache<usize> = SummaryCache::new();
        let mut calls = 0;
        assert_eq!(*cache.get_or_compute("a", "g1", || { calls += 1; 1 }), 1);
        assert_eq!(*cache.get_or_compute("a", "g1", || { calls += 1; 2 }), 1);
        assert_eq!(*cache.get_or_compute("a", "g2", || { calls += 1; 3 }), 3);
        assert_eq!(calls, 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a", "g2"), Some(&3));
        assert_eq!(cache.get("b", "g1"), None);
    }

    #[test]
    fn test_version_change_clears() {
        let mut cache: SummaryCache<u8> = SummaryCache::new();
        cache.get_or_compute("a", "g", || 1);
        cache.set_version(0);
        assert_eq!(cache.len(), 1);
        cache.set_version(5);
        assert_eq!(cache.version(), 5);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_column() {
        let mut cache: SummaryCache<u8> = SummaryCache::default();
        cache.get_or_compute("a", "g1", || 1);
        cache.get_or_compute("a", "g2", || 2);
        cache.get_or_compute("b", "g1", || 3);
        assert_eq!(cache.invalidate_column("a"), 2);
        assert_eq!(cache.invalidate_column("a"), 0);
        assert_eq!(cache.get("b", "g1"), Some(&3));
    }

    #[test]
    fn test_column_summaries() {
        let mut cache = SummaryCache::<ColumnSummary>::new();
        let s = cache.get_or_compute("score", "Default", || {
            ColumnSummary::Numeric(NumericSummary::new(&[1.0, 2.0, 3.0]))
        });
        assert_eq!(s.as_numeric().map(|s| s.median()), Some(2.0));
    }
}
