//! Column descriptions and dispatch into the summary builders.

use serde::{Deserialize, Serialize};

use crate::stats::is_missing;
use crate::summary::{CategoricalSummary, Category, NumericSummary, SummaryConfig};

/// Row values as the host stores them, addressed by row index and column
/// id.
pub trait DataSource {
    /// Numeric value of `row` in `column`; NaN when missing.
    fn number(&self, row: usize, column: &str) -> f64;

    /// Category name of `row` in `column`; `None` when missing.
    fn category(&self, row: usize, column: &str) -> Option<&str>;
}

/// What a column holds, and so which summary its header shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnKind {
    Number {
        #[serde(default)]
        config: SummaryConfig,
    },
    Categorical {
        categories: Vec<Category>,
    },
    String,
    /// Weighted sum of numeric children. Without weights every child
    /// counts `1 / children.len()`.
    Composite {
        children: Vec<ColumnDesc>,
        #[serde(default)]
        weights: Vec<f64>,
        #[serde(default)]
        config: SummaryConfig,
    },
    Rank,
    Selection,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDesc {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

/// The header summary of one column over one row subset.
#[derive(Debug, Clone)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnSummary::Numeric(s) => Some(s),
            ColumnSummary::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            ColumnSummary::Categorical(s) => Some(s),
            ColumnSummary::Numeric(_) => None,
        }
    }
}

impl ColumnDesc {
    pub fn new(id: impl Into<String>, kind: ColumnKind) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind,
        }
    }

    /// Whether values of this column are numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Number { .. } | ColumnKind::Composite { .. })
    }

    /// Numeric value of `row`, NaN for missing values and non-numeric
    /// columns.
    ///
    /// A composite skips missing children and is missing only when all of
    /// its children are.
    pub fn number<D: DataSource + ?Sized>(&self, row: usize, data: &D) -> f64 {
        match &self.kind {
            ColumnKind::Number { .. } => data.number(row, &self.id),
            ColumnKind::Composite {
                children, weights, ..
            } => {
                let mut total = 0.0;
                let mut any = false;
                for (i, child) in children.iter().enumerate() {
                    let v = child.number(row, data);
                    if is_missing(v) {
                        continue;
                    }
                    let w = weights
                        .get(i)
                        .copied()
                        .unwrap_or(1.0 / children.len() as f64);
                    total += w * v;
                    any = true;
                }
                if any {
                    total
                } else {
                    f64::NAN
                }
            }
            _ => f64::NAN,
        }
    }

    /// Summarizes this column over `rows`.
    ///
    /// Number and composite columns yield a [`NumericSummary`], categorical
    /// columns a [`CategoricalSummary`]; every other kind has no summary.
    pub fn summarize<D: DataSource + ?Sized>(&self, rows: &[usize], data: &D) -> Option<ColumnSummary> {
        match &self.kind {
            ColumnKind::Number { config } | ColumnKind::Composite { config, .. } => {
                Some(ColumnSummary::Numeric(NumericSummary::from_rows(
                    rows,
                    |r| self.number(r, data),
                    config,
                )))
            }
            ColumnKind::Categorical { categories } => {
                Some(ColumnSummary::Categorical(CategoricalSummary::from_rows(
                    rows,
                    |r| data.category(r, &self.id),
                    categories,
                )))
            }
            ColumnKind::String | ColumnKind::Rank | ColumnKind::Selection | ColumnKind::Other => None,
        }
    }
}
