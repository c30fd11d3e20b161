//! Group color assignment.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// d3 `schemeCategory10` followed by `schemeSet3`.
const PALETTE: [&str; 22] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Number of distinct colors before a pool starts repeating.
pub const MAX_COLORS: usize = PALETTE.len();

/// Cycles through a fixed palette, one color per call.
///
/// Every grouping pass owns its own pool, so the colors a group gets depend
/// only on the pool's seed and the order groups are discovered in.
///
/// # Examples
/// ```
/// use u_lineup::group::{ColorPool, MAX_COLORS};
/// let mut pool = ColorPool::new();
/// let first = pool.next_color();
/// for _ in 1..MAX_COLORS {
///     pool.next_color();
/// }
/// assert_eq!(pool.next_color(), first);
/// ```
#[derive(Debug, Clone)]
pub struct ColorPool {
    colors: Vec<&'static str>,
    next: usize,
}

impl Default for ColorPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPool {
    /// Starts at the first palette color.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Starts at palette position `offset` (modulo [`MAX_COLORS`]).
    pub fn with_offset(offset: usize) -> Self {
        Self {
            colors: PALETTE.to_vec(),
            next: offset % MAX_COLORS,
        }
    }

    /// Uses a permutation of the palette determined by `seed`.
    ///
    /// The permutation comes from a seeded `SmallRng`; it is stable for a
    /// seed on a given platform and `rand` version.
    pub fn shuffled(seed: u64) -> Self {
        let mut colors = PALETTE.to_vec();
        let mut rng = SmallRng::seed_from_u64(seed);
        colors.shuffle(&mut rng);
        Self { colors, next: 0 }
    }

    /// Returns the next color and advances the pool.
    pub fn next_color(&mut self) -> &'static str {
        let color = self.colors[self.next];
        self.next = (self.next + 1) % self.colors.len();
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cycles_through_palette() {
        let mut pool = ColorPool::new();
        let first: Vec<&str> = (0..MAX_COLORS).map(|_| pool.next_color()).collect();
        assert_eq!(first[0], "#1f77b4");
        assert_eq!(first.iter().collect::<HashSet<_>>().len(), MAX_COLORS);
        assert_eq!(pool.next_color(), "#1f77b4");
    }

    #[test]
    fn test_offset() {
        let mut pool = ColorPool::with_offset(MAX_COLORS + 1);
        assert_eq!(pool.next_color(), "#ff7f0e");
    }

    #[test]
    fn test_independent_pools() {
        let mut a = ColorPool::new();
        let mut b = ColorPool::new();
        a.next_color();
        assert_eq!(b.next_color(), "#1f77b4");
    }

    #[test]
    fn test_shuffled_is_reproducible_permutation() {
        let mut a = ColorPool::shuffled(7);
        let mut b = ColorPool::shuffled(7);
        let xs: Vec<&str> = (0..MAX_COLORS).map(|_| a.next_color()).collect();
        let ys: Vec<&str> = (0..MAX_COLORS).map(|_| b.next_color()).collect();
        assert_eq!(xs, ys);
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        let mut palette = PALETTE.to_vec();
        palette.sort_unstable();
        assert_eq!(sorted, palette);
    }
}
