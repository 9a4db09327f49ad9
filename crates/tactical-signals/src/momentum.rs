//! Lagged-return momentum rule.

use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tactical_traits::{
    Dataset, FORWARD_RETURNS, LAGGED_FORWARD_RETURNS, Predictor, Result, TacticalError,
};
use tracing::{debug, info};

use crate::submission::clip_weights;

/// Configuration for [`LaggedMomentumRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaggedMomentumConfig {
    /// Test column holding the previous period's market return
    pub lag_column: String,
    /// Weight after a positive lagged return
    pub overweight: f64,
    /// Weight after a zero, negative or missing lagged return
    pub underweight: f64,
    /// Lower clip bound
    pub min_weight: f64,
    /// Upper clip bound
    pub max_weight: f64,
}

impl Default for LaggedMomentumConfig {
    fn default() -> Self {
        Self {
            lag_column: LAGGED_FORWARD_RETURNS.to_string(),
            overweight: 1.2,
            underweight: 0.8,
            min_weight: 0.0,
            max_weight: 2.0,
        }
    }
}

/// Trend-following baseline: lean into the market after an up period.
///
/// When the test set carries the lagged return, each row is decided on its
/// own lag. Otherwise every row gets the weight implied by the last
/// `forward_returns` value of the training set.
///
/// # Example
///
/// ```ignore
/// use tactical_signals::LaggedMomentumRule;
/// use tactical_traits::Predictor;
///
/// let rule = LaggedMomentumRule::default();
/// let weights = rule.predict(&test, &train)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct LaggedMomentumRule {
    config: LaggedMomentumConfig,
}

impl LaggedMomentumRule {
    /// Create a rule with the given configuration.
    #[must_use]
    pub const fn new(config: LaggedMomentumConfig) -> Self {
        Self { config }
    }

    /// The rule's configuration.
    #[must_use]
    pub const fn config(&self) -> &LaggedMomentumConfig {
        &self.config
    }

    fn weight_for(&self, lagged: Option<f64>) -> f64 {
        // Nulls and NaN are not positive.
        match lagged {
            Some(r) if r > 0.0 => self.config.overweight,
            _ => self.config.underweight,
        }
    }

    fn from_lag_column(&self, test: &Dataset) -> Result<Array1<f64>> {
        let lagged = numeric_column(test, &self.config.lag_column)?;
        Ok(lagged
            .f64()?
            .into_iter()
            .map(|r| self.weight_for(r))
            .collect())
    }

    fn from_last_train_return(&self, test: &Dataset, train: &Dataset) -> Result<Array1<f64>> {
        let returns = numeric_column(train, FORWARD_RETURNS)?;
        if returns.is_empty() {
            return Err(TacticalError::InsufficientData(
                "training set has no rows to take the last return from".to_string(),
            ));
        }
        let last = returns.f64()?.get(returns.len() - 1);
        debug!(last_return = ?last, "lag column absent; using last training return");
        Ok(Array1::from_elem(test.len(), self.weight_for(last)))
    }
}

/// `name` from `dataset` as a Float64 series.
fn numeric_column(dataset: &Dataset, name: &str) -> Result<Series> {
    let column = dataset
        .column(name)
        .ok_or_else(|| TacticalError::MissingColumn(name.to_string()))?;
    let dtype = column.dtype();
    if !(dtype.is_integer() || dtype.is_float()) {
        return Err(TacticalError::InvalidData(format!(
            "column {name} must be numeric, found {dtype}"
        )));
    }
    Ok(column.as_materialized_series().cast(&DataType::Float64)?)
}

impl Predictor for LaggedMomentumRule {
    fn name(&self) -> &str {
        "lagged_momentum"
    }

    fn predict(&self, test: &Dataset, train: &Dataset) -> Result<Array1<f64>> {
        let raw = if test.has_column(&self.config.lag_column) {
            self.from_lag_column(test)?
        } else {
            self.from_last_train_return(test, train)?
        };
        let weights = clip_weights(&raw, self.config.min_weight, self.config.max_weight);

        let overweight = weights.iter().filter(|&&w| w > 1.0).count();
        info!(
            rows = weights.len(),
            overweight,
            underweight = weights.len() - overweight,
            "lagged momentum predictions"
        );
        Ok(weights)
    }

    fn input_columns(&self) -> &[&str] {
        &[LAGGED_FORWARD_RETURNS]
    }
}
