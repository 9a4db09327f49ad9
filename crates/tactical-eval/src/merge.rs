//! Joining predictions onto realized returns.
//!
//! The solution dataset drives the join: every solution row must end up with
//! exactly one numeric, in-range prediction, and the joined set keeps the
//! solution's row order. The checks run in a fixed order
//! (missing, then dtype, then bounds) so that a submission with several
//! problems always reports the same one.

use ndarray::Array1;
use polars::prelude::*;
use std::collections::HashMap;
use tactical_traits::{FORWARD_RETURNS, PREDICTION, RISK_FREE_RATE, Result, TacticalError};
use tracing::debug;

use crate::config::ScoreConfig;
use crate::returns::strategy_return;

/// Predictions aligned with realized returns, one entry per solution row.
#[derive(Debug, Clone)]
pub struct JoinedFrame {
    ids: Vec<String>,
    prediction: Array1<f64>,
    forward_returns: Array1<f64>,
    risk_free_rate: Array1<f64>,
}

/// A single period of a [`JoinedFrame`], with the derived strategy return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedRow<'a> {
    /// Identifier rendered as text
    pub id: &'a str,
    /// Submitted portfolio weight
    pub prediction: f64,
    /// Realized market return
    pub forward_return: f64,
    /// Realized risk-free return
    pub risk_free_rate: f64,
    /// Position held over the period (equal to the prediction)
    pub position: f64,
    /// Return earned by holding `position` in the market and the rest in cash
    pub strategy_return: f64,
}

impl JoinedFrame {
    /// Build a joined set from plain arrays, applying the same validation as [`merge`].
    ///
    /// Identifiers are the row positions.
    ///
    /// # Errors
    ///
    /// Fails if the arrays differ in length or are empty, if any prediction is
    /// NaN or outside the configured bounds, or if a return is not finite.
    pub fn from_arrays(
        prediction: Array1<f64>,
        forward_returns: Array1<f64>,
        risk_free_rate: Array1<f64>,
        config: &ScoreConfig,
    ) -> Result<Self> {
        let n = prediction.len();
        if forward_returns.len() != n || risk_free_rate.len() != n {
            return Err(TacticalError::InvalidData(format!(
                "length mismatch: {} predictions, {} forward returns, {} risk-free rates",
                n,
                forward_returns.len(),
                risk_free_rate.len()
            )));
        }
        if n == 0 {
            return Err(TacticalError::InsufficientData(
                "no periods to score".to_string(),
            ));
        }

        let missing = prediction.iter().filter(|p| p.is_nan()).count();
        if missing > 0 {
            return Err(TacticalError::MissingPrediction { count: missing });
        }
        check_bounds(&prediction.to_vec(), config)?;
        check_finite(FORWARD_RETURNS, &forward_returns)?;
        check_finite(RISK_FREE_RATE, &risk_free_rate)?;

        Ok(Self {
            ids: (0..n).map(|i| i.to_string()).collect(),
            prediction,
            forward_returns,
            risk_free_rate,
        })
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.prediction.len()
    }

    /// Whether the set has no periods.
    pub fn is_empty(&self) -> bool {
        self.prediction.is_empty()
    }

    /// Identifiers in solution order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Submitted weights.
    pub const fn prediction(&self) -> &Array1<f64> {
        &self.prediction
    }

    /// Realized market returns.
    pub const fn forward_returns(&self) -> &Array1<f64> {
        &self.forward_returns
    }

    /// Realized risk-free returns.
    pub const fn risk_free_rate(&self) -> &Array1<f64> {
        &self.risk_free_rate
    }

    /// Iterate over the periods as rows.
    pub fn rows(&self) -> impl Iterator<Item = JoinedRow<'_>> + '_ {
        (0..self.len()).map(move |i| {
            let position = self.prediction[i];
            let forward_return = self.forward_returns[i];
            let risk_free_rate = self.risk_free_rate[i];
            JoinedRow {
                id: &self.ids[i],
                prediction: position,
                forward_return,
                risk_free_rate,
                position,
                strategy_return: strategy_return(position, forward_return, risk_free_rate),
            }
        })
    }
}

/// Left-join `submission` onto `solution` by `id_key` and validate the predictions.
///
/// # Errors
///
/// - [`TacticalError::MissingColumn`] if a required column is absent
/// - [`TacticalError::InsufficientData`] if the solution has no rows
/// - [`TacticalError::InvalidData`] if a numeric identifier column meets a
///   non-numeric one, or the realized returns contain gaps
/// - [`TacticalError::DuplicateIdentifier`] if an identifier matches several
///   submission rows
/// - [`TacticalError::MissingPrediction`] if a solution row has no prediction
/// - [`TacticalError::InvalidPredictionType`] if predictions are not numeric
/// - [`TacticalError::OutOfBounds`] if a prediction is outside the allowed range
///
/// # Example
///
/// ```rust,ignore
/// use tactical_eval::{merge, ScoreConfig};
///
/// let joined = merge(&solution, &submission, "date_id", &ScoreConfig::default())?;
/// assert_eq!(joined.len(), solution.height());
/// ```
pub fn merge(
    solution: &DataFrame,
    submission: &DataFrame,
    id_key: &str,
    config: &ScoreConfig,
) -> Result<JoinedFrame> {
    require_columns(solution, &[id_key, FORWARD_RETURNS, RISK_FREE_RATE])?;
    require_columns(submission, &[id_key, PREDICTION])?;

    if solution.height() == 0 {
        return Err(TacticalError::InsufficientData(
            "solution has no rows".to_string(),
        ));
    }

    let key_dtype = join_key_dtype(
        solution.column(id_key)?.dtype(),
        submission.column(id_key)?.dtype(),
        id_key,
    )?;
    let solution_ids = identifiers(solution, id_key, &key_dtype)?;
    let submission_ids = identifiers(submission, id_key, &key_dtype)?;

    let mut rows_by_id: HashMap<&str, Vec<usize>> = HashMap::with_capacity(submission_ids.len());
    for (row, id) in submission_ids.iter().enumerate() {
        if let Some(id) = id {
            rows_by_id.entry(id.as_str()).or_default().push(row);
        }
    }

    // Submission row matched by each solution row, in solution order.
    let mut matched: Vec<Option<usize>> = Vec::with_capacity(solution_ids.len());
    let mut duplicates = 0;
    for id in &solution_ids {
        match id.as_deref().and_then(|id| rows_by_id.get(id)) {
            Some(rows) => {
                duplicates += rows.len() - 1;
                matched.push(Some(rows[0]));
            }
            None => matched.push(None),
        }
    }

    debug!(
        solution_rows = solution.height(),
        submission_rows = submission.height(),
        matched_rows = matched.iter().flatten().count(),
        id_key,
        "joined submission onto solution"
    );

    if duplicates > 0 {
        return Err(TacticalError::DuplicateIdentifier { count: duplicates });
    }

    let prediction = submission.column(PREDICTION)?.as_materialized_series();

    let gaps = missing_flags(prediction)?;
    let missing = matched
        .iter()
        .filter(|row| row.is_none_or(|row| gaps[row]))
        .count();
    if missing > 0 {
        return Err(TacticalError::MissingPrediction { count: missing });
    }

    if !is_numeric(prediction.dtype()) {
        return Err(TacticalError::InvalidPredictionType {
            dtype: prediction.dtype().to_string(),
        });
    }

    let values: Vec<Option<f64>> = prediction
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .collect();
    let weights: Vec<f64> = matched
        .iter()
        .flatten()
        .filter_map(|&row| values[row])
        .collect();
    check_bounds(&weights, config)?;

    let forward_returns = Array1::from_vec(return_values(solution, FORWARD_RETURNS)?);
    let risk_free_rate = Array1::from_vec(return_values(solution, RISK_FREE_RATE)?);

    Ok(JoinedFrame {
        ids: solution_ids
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect(),
        prediction: Array1::from_vec(weights),
        forward_returns,
        risk_free_rate,
    })
}

fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    for name in columns {
        if df.column(name).is_err() {
            return Err(TacticalError::MissingColumn((*name).to_string()));
        }
    }
    Ok(())
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Common dtype both identifier columns are compared in. Mixed numeric ids
/// (`0` against `0.0`) meet as `Float64`; numeric against text never matches.
fn join_key_dtype(left: &DataType, right: &DataType, id_key: &str) -> Result<DataType> {
    if left == right {
        Ok(left.clone())
    } else if is_numeric(left) && is_numeric(right) {
        Ok(DataType::Float64)
    } else {
        Err(TacticalError::InvalidData(format!(
            "identifier column '{id_key}' is {left} in solution but {right} in submission"
        )))
    }
}

/// Identifier values cast to `key_dtype` and rendered as text; nulls never match.
fn identifiers(df: &DataFrame, id_key: &str, key_dtype: &DataType) -> Result<Vec<Option<String>>> {
    Ok(df
        .column(id_key)?
        .as_materialized_series()
        .cast(key_dtype)?
        .cast(&DataType::String)?
        .str()?
        .into_iter()
        .map(|id| id.map(str::to_string))
        .collect())
}

/// Per-row flag for nulls and float NaNs, which is how an unmatched row
/// appears in most tabular tools.
fn missing_flags(series: &Series) -> Result<Vec<bool>> {
    let mut flags: Vec<bool> = series
        .is_null()
        .into_iter()
        .map(|v| v.unwrap_or(false))
        .collect();
    if series.dtype().is_float() {
        let values = series.cast(&DataType::Float64)?;
        for (flag, value) in flags.iter_mut().zip(values.f64()?.into_iter()) {
            if value.is_some_and(f64::is_nan) {
                *flag = true;
            }
        }
    }
    Ok(flags)
}

fn to_f64_values(series: &Series) -> Result<Vec<f64>> {
    let values = series.cast(&DataType::Float64)?;
    values
        .f64()?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                TacticalError::InvalidData(format!("null value in column '{}'", series.name()))
            })
        })
        .collect()
}

fn return_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.as_materialized_series();
    if !is_numeric(series.dtype()) {
        return Err(TacticalError::InvalidData(format!(
            "column '{name}' must be numeric, found {}",
            series.dtype()
        )));
    }
    let values = to_f64_values(series)?;
    check_finite(name, &values)?;
    Ok(values)
}

fn check_finite<'a>(name: &str, values: impl IntoIterator<Item = &'a f64>) -> Result<()> {
    let gaps = values.into_iter().filter(|v| !v.is_finite()).count();
    if gaps > 0 {
        return Err(TacticalError::InvalidData(format!(
            "column '{name}' has {gaps} non-finite value(s)"
        )));
    }
    Ok(())
}

fn check_bounds(weights: &[f64], config: &ScoreConfig) -> Result<()> {
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if weights.iter().any(|&w| !config.allows(w)) {
        return Err(TacticalError::OutOfBounds {
            min,
            max,
            lower: config.min_prediction,
            upper: config.max_prediction,
        });
    }
    Ok(())
}
