//! # u-lineup
//!
//! Statistics and ranking engine behind a tabular ranking view.
//!
//! This crate computes what a ranking table shows next to its rows: box plot
//! and histogram summaries per column and row subset, category frequencies,
//! nested group hierarchies, competition ranks, and group ordering by an
//! aggregated value. It knows nothing about rendering or layout.
//!
//! ## Modules
//!
//! - [`stats`]: Numeric primitives: quantiles, compensated sums, NaN-aware ordering
//! - [`summary`]: Lazy numeric and categorical column summaries
//! - [`group`]: Group arena, intersection groups, ancestor unification
//! - [`rank`]: Competition ranking over a sorted row order
//! - [`compare`]: Comparing and sorting groups by a summary statistic
//! - [`column`]: Column kinds and summary dispatch
//! - [`order`]: Row filtering and skip/limit windows
//! - [`cache`]: Summary memoization across renders
//!
//! ## Design Philosophy
//!
//! - **Missing data never fails**: NaN, zero, and empty sentinels instead of errors
//! - **Compute on first read**: summaries sort and bin lazily, at most once
//! - **Property-based testing**: Statistical invariants verified via proptest

pub mod cache;
pub mod column;
pub mod compare;
pub mod group;
pub mod order;
pub mod rank;
pub mod stats;
pub mod summary;
