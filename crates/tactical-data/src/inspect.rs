//! Shape, column and dtype overview of a dataset.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Name and dtype of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Polars dtype, rendered as text
    pub dtype: String,
}

/// A quick look at a dataset before any processing.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Label shown in the report, usually the file name
    pub name: String,
    /// Number of rows
    pub rows: usize,
    /// Columns in order, with dtypes
    pub columns: Vec<ColumnInfo>,
    /// First rows of the dataset
    pub head: DataFrame,
}

impl DatasetSummary {
    /// `(rows, columns)` of the full dataset.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }
}

/// Summarize `df` under `name`, keeping the first `head_rows` rows.
#[must_use]
pub fn inspect(name: &str, df: &DataFrame, head_rows: usize) -> DatasetSummary {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| ColumnInfo {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
        })
        .collect();

    DatasetSummary {
        name: name.to_string(),
        rows: df.height(),
        columns,
        head: df.head(Some(head_rows)),
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Inspecting {} ===", self.name)?;
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        writeln!(f, "Columns: {names:?}")?;
        writeln!(f, "Dtypes:")?;
        let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
        for column in &self.columns {
            writeln!(f, "  {:<width$}  {}", column.name, column.dtype)?;
        }
        writeln!(f)?;
        writeln!(f, "First rows:")?;
        writeln!(f, "{}", self.head)?;
        writeln!(f)?;
        let (rows, cols) = self.shape();
        write!(f, "Shape: ({rows}, {cols})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame() -> DataFrame {
        df! {
            "date_id" => &[0i64, 1, 2, 3, 4, 5, 6],
            "forward_returns" => &[0.01, -0.02, 0.015, 0.0, 0.003, -0.001, 0.002],
            "E1" => &["x", "y", "z", "x", "y", "z", "x"],
        }
        .unwrap()
    }

    #[test]
    fn test_inspect_reports_full_shape_and_head() {
        let summary = inspect("train.csv", &frame(), 5);

        assert_eq!(summary.shape(), (7, 3));
        assert_eq!(summary.head.height(), 5);
        assert_eq!(summary.columns[0].name, "date_id");
        assert_eq!(summary.columns[0].dtype, "i64");
        assert_eq!(summary.columns[1].dtype, "f64");
        assert_eq!(summary.columns[2].dtype, "str");
    }

    #[test]
    fn test_head_is_capped_at_height() {
        let summary = inspect("small", &frame(), 50);
        assert_eq!(summary.head.height(), 7);
    }

    #[test]
    fn test_display() {
        let text = inspect("test.csv", &frame(), 2).to_string();
        assert!(text.starts_with("=== Inspecting test.csv ==="));
        assert!(text.contains("forward_returns"));
        assert!(text.ends_with("Shape: (7, 3)"));
    }
}
