//! Missing-value diagnostics.
//!
//! A value counts as missing when it is null or, in a float column, NaN. The
//! report only describes where data is missing; it never fills or drops
//! anything.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tactical_traits::{DATE_ID, Describe, Result};
use tracing::{debug, info};

use crate::loader::write_csv;

/// Name of the per-row missing count column in the saved per-row file.
pub const MISSING_PER_ROW: &str = "missing_per_row";

/// Settings for [`MissingReport::compute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingConfig {
    /// Feature-group prefixes. Matching is by `starts_with`, so `M` also
    /// covers every `MOM*` column.
    pub prefixes: Vec<String>,
    /// Quantiles reported for the per-row missing counts
    pub quantiles: Vec<f64>,
    /// Column used for the over-time profile, when present
    pub date_column: String,
}

impl Default for MissingConfig {
    fn default() -> Self {
        Self {
            prefixes: ["M", "E", "I", "P", "V", "S", "MOM", "D"]
                .into_iter()
                .map(String::from)
                .collect(),
            quantiles: vec![0.25, 0.5, 0.75, 0.9, 0.95],
            date_column: DATE_ID.to_string(),
        }
    }
}

/// Missing values in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    /// Column name
    pub column: String,
    /// Number of missing values
    pub missing_count: usize,
    /// Missing values as a percentage of rows
    pub missing_percent: f64,
}

/// Missing values across all columns sharing a prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMissing {
    /// Feature-group prefix
    pub prefix: String,
    /// Number of columns in the group
    pub columns: usize,
    /// Missing cells as a percentage of the group's cells
    pub missing_percent: f64,
}

/// Average missing values per row for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateMissing {
    /// Date identifier
    pub date_id: i64,
    /// Mean missing count over the rows with this date
    pub avg_missing_per_row: f64,
}

/// How missingness evolves over `date_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateProfile {
    /// Averages in ascending date order
    pub averages: Vec<DateMissing>,
    /// Earliest date
    pub first: i64,
    /// Latest date
    pub last: i64,
}

/// Missing-value diagnostics for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    /// Dataset label, used for output file names
    pub name: String,
    /// Number of rows
    pub rows: usize,
    /// Per-column counts, most missing first
    pub columns: Vec<ColumnMissing>,
    /// Number of columns with at least one missing value
    pub columns_with_missing: usize,
    /// Missing count for every row, in row order
    pub per_row: Vec<u32>,
    /// Date identifier for every row, when the dataset has one
    pub row_dates: Option<Vec<Option<i64>>>,
    /// Distribution of the per-row counts
    pub per_row_summary: Describe,
    /// Per-prefix percentages, most missing first. Prefixes with no matching
    /// column are omitted.
    pub groups: Vec<GroupMissing>,
    /// Over-time profile, when the dataset has a date column
    pub by_date: Option<DateProfile>,
}

impl MissingReport {
    /// Diagnose missing values in `df`.
    ///
    /// # Errors
    ///
    /// Returns an error if a column cannot be scanned or the date column
    /// cannot be read as integers.
    pub fn compute(name: &str, df: &DataFrame, config: &MissingConfig) -> Result<Self> {
        let rows = df.height();
        let mut per_row = vec![0u32; rows];
        let mut columns = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let mask = missing_mask(column.as_materialized_series())?;
            let mut missing_count = 0;
            for (row, missing) in mask.iter().enumerate() {
                if *missing {
                    per_row[row] += 1;
                    missing_count += 1;
                }
            }
            columns.push(ColumnMissing {
                column: column.name().to_string(),
                missing_count,
                missing_percent: percent(missing_count, rows),
            });
        }

        let groups = group_missing(&columns, rows, &config.prefixes);
        let columns_with_missing = columns.iter().filter(|c| c.missing_count > 0).count();
        columns.sort_by(|a, b| b.missing_percent.total_cmp(&a.missing_percent));

        let counts: Vec<f64> = per_row.iter().map(|&n| f64::from(n)).collect();
        let per_row_summary = Describe::from_values(&counts, &config.quantiles);

        let has_dates = df
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == config.date_column);
        let (row_dates, by_date) = if has_dates {
            let dates = date_ids(df, &config.date_column)?;
            let profile = date_profile(&dates, &per_row, &config.date_column)?;
            (Some(dates), profile)
        } else {
            (None, None)
        };

        debug!(
            name,
            columns_with_missing,
            mean_missing_per_row = per_row_summary.mean,
            "computed missing-value report"
        );

        Ok(Self {
            name: name.to_string(),
            rows,
            columns,
            columns_with_missing,
            per_row,
            row_dates,
            per_row_summary,
            groups,
            by_date,
        })
    }

    /// Total number of columns scanned.
    #[must_use]
    pub fn total_columns(&self) -> usize {
        self.columns.len()
    }

    /// The per-column table as a frame: `column, missing_count, missing_percent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be built.
    pub fn summary_frame(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.columns.iter().map(|c| c.column.as_str()).collect();
        let counts: Vec<u64> = self.columns.iter().map(|c| c.missing_count as u64).collect();
        let percents: Vec<f64> = self.columns.iter().map(|c| c.missing_percent).collect();
        Ok(df! {
            "column" => names,
            "missing_count" => counts,
            "missing_percent" => percents,
        }?)
    }

    /// The per-row counts as a frame, keyed by date when available.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be built.
    pub fn per_row_frame(&self) -> Result<DataFrame> {
        let counts = Column::new(MISSING_PER_ROW.into(), &self.per_row);
        let key = match &self.row_dates {
            Some(dates) => Column::new(DATE_ID.into(), dates),
            None => {
                let index: Vec<u64> = (0..self.rows as u64).collect();
                Column::new("row".into(), index)
            }
        };
        Ok(DataFrame::new(vec![key, counts])?)
    }

    /// Write `<name>_missing_summary.csv` and `<name>_missing_per_row.csv`
    /// into `out_dir`, returning both paths.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self, out_dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let out_dir = out_dir.as_ref();
        let stem = self.name.strip_suffix(".csv").unwrap_or(&self.name);
        let summary_path = out_dir.join(format!("{stem}_missing_summary.csv"));
        let per_row_path = out_dir.join(format!("{stem}_missing_per_row.csv"));

        write_csv(&mut self.summary_frame()?, &summary_path)?;
        write_csv(&mut self.per_row_frame()?, &per_row_path)?;

        info!(
            summary = %summary_path.display(),
            per_row = %per_row_path.display(),
            "saved missing-value summaries"
        );
        Ok((summary_path, per_row_path))
    }
}

/// `true` for every null value, and for NaN in float columns.
fn missing_mask(series: &Series) -> Result<Vec<bool>> {
    if series.dtype().is_float() {
        let values = series.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .map(|v| v.is_none_or(f64::is_nan))
            .collect())
    } else {
        Ok(series
            .is_null()
            .into_iter()
            .map(|v| v.unwrap_or(false))
            .collect())
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn group_missing(columns: &[ColumnMissing], rows: usize, prefixes: &[String]) -> Vec<GroupMissing> {
    let mut groups: Vec<GroupMissing> = prefixes
        .iter()
        .filter_map(|prefix| {
            let members: Vec<&ColumnMissing> = columns
                .iter()
                .filter(|c| c.column.starts_with(prefix.as_str()))
                .collect();
            if members.is_empty() {
                return None;
            }
            let missing: usize = members.iter().map(|c| c.missing_count).sum();
            Some(GroupMissing {
                prefix: prefix.clone(),
                columns: members.len(),
                missing_percent: percent(missing, members.len() * rows),
            })
        })
        .collect();
    groups.sort_by(|a, b| b.missing_percent.total_cmp(&a.missing_percent));
    groups
}

fn date_ids(df: &DataFrame, date_column: &str) -> Result<Vec<Option<i64>>> {
    let dates = df
        .column(date_column)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    Ok(dates.i64()?.into_iter().collect())
}

/// Average the per-row counts by date. Rows without a date are skipped.
fn date_profile(
    dates: &[Option<i64>],
    per_row: &[u32],
    date_column: &str,
) -> Result<Option<DateProfile>> {
    let frame = df! {
        date_column => dates,
        MISSING_PER_ROW => per_row,
    }?;

    let averaged = frame
        .lazy()
        .filter(col(date_column).is_not_null())
        .group_by([col(date_column)])
        .agg([col(MISSING_PER_ROW)
            .cast(DataType::Float64)
            .mean()
            .alias("avg_missing_per_row")])
        .sort([date_column], SortMultipleOptions::default())
        .collect()?;

    let ids = averaged.column(date_column)?.as_materialized_series().i64()?;
    let avgs = averaged
        .column("avg_missing_per_row")?
        .as_materialized_series()
        .f64()?;

    let averages: Vec<DateMissing> = ids
        .into_iter()
        .zip(avgs)
        .filter_map(|(id, avg)| {
            Some(DateMissing {
                date_id: id?,
                avg_missing_per_row: avg?,
            })
        })
        .collect();

    Ok(match (averages.first(), averages.last()) {
        (Some(first), Some(last)) => {
            let (first, last) = (first.date_id, last.date_id);
            Some(DateProfile {
                averages,
                first,
                last,
            })
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> DataFrame {
        df! {
            "date_id" => &[0i64, 0, 1, 2],
            "M1" => &[None, Some(1.0), Some(2.0), Some(3.0)],
            "MOM1" => &[None, None, Some(f64::NAN), Some(1.0)],
            "E1" => &[Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
            "V1" => &[None, Some("a"), Some("b"), None],
        }
        .unwrap()
    }

    #[test]
    fn test_column_counts_sorted_descending() {
        let report = MissingReport::compute("train.csv", &frame(), &MissingConfig::default()).unwrap();

        assert_eq!(report.rows, 4);
        assert_eq!(report.total_columns(), 5);
        assert_eq!(report.columns_with_missing, 3);

        let order: Vec<&str> = report.columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(order[0], "MOM1");
        assert_eq!(report.columns[0].missing_count, 3);
        assert_relative_eq!(report.columns[0].missing_percent, 75.0);
        assert_eq!(report.columns[1].column, "V1");
        assert_eq!(report.columns[2].column, "M1");
        assert!(report.columns[3..].iter().all(|c| c.missing_count == 0));
    }

    #[test]
    fn test_per_row_counts_and_describe() {
        let report = MissingReport::compute("train.csv", &frame(), &MissingConfig::default()).unwrap();

        assert_eq!(report.per_row, vec![3, 1, 1, 1]);
        let summary = &report.per_row_summary;
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.mean, 1.5);
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.max, 3.0);
        assert_eq!(summary.quantiles.len(), 5);
        assert_relative_eq!(summary.quantiles[1].1, 1.0);
        // 0.95 quantile interpolates between 1 and 3.
        assert_relative_eq!(summary.quantiles[4].1, 1.0 + 2.0 * 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_prefix_groups_use_starts_with() {
        let report = MissingReport::compute("train.csv", &frame(), &MissingConfig::default()).unwrap();

        let m = report.groups.iter().find(|g| g.prefix == "M").unwrap();
        // M covers M1 and MOM1: 4 missing of 8 cells.
        assert_eq!(m.columns, 2);
        assert_relative_eq!(m.missing_percent, 50.0);

        let mom = report.groups.iter().find(|g| g.prefix == "MOM").unwrap();
        assert_relative_eq!(mom.missing_percent, 75.0);

        assert_eq!(report.groups[0].prefix, "MOM");
        assert!(report.groups.iter().all(|g| g.prefix != "I"));
        assert!(
            report
                .groups
                .windows(2)
                .all(|w| w[0].missing_percent >= w[1].missing_percent)
        );
    }

    #[test]
    fn test_date_profile() {
        let report = MissingReport::compute("train.csv", &frame(), &MissingConfig::default()).unwrap();

        let profile = report.by_date.unwrap();
        assert_eq!(profile.first, 0);
        assert_eq!(profile.last, 2);
        assert_eq!(profile.averages.len(), 3);
        assert_eq!(profile.averages[0].date_id, 0);
        assert_relative_eq!(profile.averages[0].avg_missing_per_row, 2.0);
        assert_relative_eq!(profile.averages[2].avg_missing_per_row, 1.0);
    }

    #[test]
    fn test_without_date_column() {
        let df = df! { "S1" => &[Some(1.0), None] }.unwrap();
        let report = MissingReport::compute("test", &df, &MissingConfig::default()).unwrap();

        assert!(report.by_date.is_none());
        assert!(report.row_dates.is_none());
        let per_row = report.per_row_frame().unwrap();
        assert_eq!(per_row.get_column_names()[0].as_str(), "row");
    }

    #[test]
    fn test_report_leaves_data_untouched() {
        let df = df! {
            "date_id" => &[0i64, 1, 2],
            "P1" => &[Some(1.0), None, Some(3.0)],
        }
        .unwrap();
        let before = df.clone();
        MissingReport::compute("train.csv", &df, &MissingConfig::default()).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_save_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let report = MissingReport::compute("train.csv", &frame(), &MissingConfig::default()).unwrap();

        let (summary, per_row) = report.save(dir.path().join("outputs")).unwrap();
        assert!(summary.ends_with("train_missing_summary.csv"));
        assert!(per_row.ends_with("train_missing_per_row.csv"));

        let summary = crate::read_csv(&summary).unwrap();
        assert_eq!(summary.shape(), (5, 3));
        let per_row = crate::read_csv(&per_row).unwrap();
        assert_eq!(per_row.columns(), vec![DATE_ID, MISSING_PER_ROW]);
        assert_eq!(per_row.len(), 4);
    }
}
