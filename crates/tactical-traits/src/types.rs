//! Common types used throughout the tactical workspace.
//!
//! This module defines the tabular container used for solution and submission
//! datasets, the well-known column names, and the tag that identifies which
//! return series a statistic was computed for.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the realized market return of a period.
pub const FORWARD_RETURNS: &str = "forward_returns";

/// Column holding the realized risk-free return of a period.
pub const RISK_FREE_RATE: &str = "risk_free_rate";

/// Column holding the predicted portfolio weight of a period.
pub const PREDICTION: &str = "prediction";

/// Column holding the previous period's market return in test datasets.
pub const LAGGED_FORWARD_RETURNS: &str = "lagged_forward_returns";

/// Identifier column used by the competition datasets.
pub const DATE_ID: &str = "date_id";

/// Which return series a statistic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnSeries {
    /// Returns of the blended cash/market strategy implied by the predictions.
    Strategy,
    /// Raw market returns.
    Market,
}

impl fmt::Display for ReturnSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strategy => f.write_str("strategy"),
            Self::Market => f.write_str("market"),
        }
    }
}

/// Container for one tabular dataset.
///
/// `Dataset` wraps a Polars DataFrame. Both the solution (`forward_returns`,
/// `risk_free_rate`) and the submission (`prediction`) are carried this way.
///
/// # Example
///
/// ```no_run
/// use tactical_traits::Dataset;
/// use polars::prelude::*;
///
/// let df = df! {
///     "date_id" => &[0i64, 1],
///     "prediction" => &[1.0, 0.5],
/// }.unwrap();
///
/// let submission = Dataset::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    data: DataFrame,
}

impl Dataset {
    /// Creates a new `Dataset` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.column(name).ok()
    }
}

impl From<DataFrame> for Dataset {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for Dataset {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}
