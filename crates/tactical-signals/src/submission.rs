//! Clipping and submission files.

use std::path::Path;

use ndarray::Array1;
use polars::prelude::*;
use tactical_traits::{Dataset, PREDICTION, Result, TacticalError};
use tracing::info;

/// Clip every weight into `[lower, upper]`. NaN is left as is.
#[must_use]
pub fn clip_weights(weights: &Array1<f64>, lower: f64, upper: f64) -> Array1<f64> {
    weights.mapv(|w| if w.is_nan() { w } else { w.max(lower).min(upper) })
}

/// Build a two-column `[id_column, prediction]` frame in test-row order.
///
/// # Errors
///
/// [`TacticalError::MissingColumn`] if `id_column` is absent and
/// [`TacticalError::InvalidData`] if the number of predictions does not match
/// the number of test rows.
pub fn build_submission(
    test: &Dataset,
    id_column: &str,
    predictions: &Array1<f64>,
) -> Result<DataFrame> {
    if !test.has_column(id_column) {
        return Err(TacticalError::MissingColumn(id_column.to_string()));
    }
    if predictions.len() != test.len() {
        return Err(TacticalError::InvalidData(format!(
            "{} predictions for {} test rows",
            predictions.len(),
            test.len()
        )));
    }

    let mut submission = test.data().select([id_column])?;
    submission.with_column(Column::new(PREDICTION.into(), predictions.to_vec()))?;
    Ok(submission)
}

/// Build the submission and write it as CSV to `path`.
///
/// # Errors
///
/// See [`build_submission`]; also fails if the file cannot be written.
pub fn write_submission(
    test: &Dataset,
    id_column: &str,
    predictions: &Array1<f64>,
    path: impl AsRef<Path>,
) -> Result<DataFrame> {
    let path = path.as_ref();
    let mut submission = build_submission(test, id_column, predictions)?;
    tactical_data::write_csv(&mut submission, path)?;
    info!(path = %path.display(), rows = submission.height(), "saved submission");
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn test_set() -> Dataset {
        Dataset::new(
            df! {
                "date_id" => &[10i64, 11, 12],
                "lagged_forward_returns" => &[0.01, -0.02, 0.0],
            }
            .unwrap(),
        )
    }

    #[test]
    fn test_clip_weights() {
        let clipped = clip_weights(&array![-0.5, 0.3, 2.7, f64::NAN], 0.0, 2.0);
        assert_eq!(clipped[0], 0.0);
        assert_eq!(clipped[1], 0.3);
        assert_eq!(clipped[2], 2.0);
        assert!(clipped[3].is_nan());
    }

    #[test]
    fn test_build_submission() {
        let submission = build_submission(&test_set(), "date_id", &array![1.2, 0.8, 0.8]).unwrap();

        assert_eq!(submission.shape(), (3, 2));
        let names: Vec<&str> = submission
            .get_column_names()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(names, vec!["date_id", "prediction"]);
    }

    #[test]
    fn test_build_submission_validates_inputs() {
        let err = build_submission(&test_set(), "row_id", &array![1.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, TacticalError::MissingColumn(_)));

        let err = build_submission(&test_set(), "date_id", &array![1.0]).unwrap_err();
        assert!(matches!(err, TacticalError::InvalidData(_)));
    }

    #[test]
    fn test_write_submission() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions").join("rule_pred.csv");

        write_submission(&test_set(), "date_id", &array![1.2, 0.8, 0.8], &path).unwrap();

        let saved = tactical_data::read_csv(&path).unwrap();
        assert_eq!(saved.columns(), vec!["date_id", "prediction"]);
        assert_eq!(saved.len(), 3);

        let weights: Vec<f64> = saved
            .column(PREDICTION)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        for (saved, expected) in weights.iter().zip([1.2, 0.8, 0.8]) {
            assert_relative_eq!(*saved, expected, epsilon = 1e-12);
        }
    }
}
