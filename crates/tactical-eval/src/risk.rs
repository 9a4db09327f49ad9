//! Mean excess return, volatility and Sharpe ratio of a return series.
//!
//! The same routine runs for the strategy and for the market so the two
//! sides of the comparison can never drift apart.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tactical_traits::stats::{compounded_mean, population_std};
use tactical_traits::{MeanKind, Result, ReturnSeries, TacticalError};
use tracing::{debug, warn};

use crate::config::ScoreConfig;

/// Risk and return statistics of one return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskStats {
    /// Which series these statistics describe
    pub series: ReturnSeries,
    /// Per-period mean excess return over the risk-free rate
    pub mean_excess_return: f64,
    /// Whether the mean is geometric or the arithmetic fallback
    pub mean_kind: MeanKind,
    /// Per-period population standard deviation of the raw returns
    pub volatility: f64,
    /// Annualized volatility in percent
    pub annualized_volatility: f64,
    /// Annualized Sharpe ratio
    pub sharpe: f64,
}

impl RiskStats {
    /// Compute statistics for `returns` measured against `risk_free`.
    ///
    /// # Arguments
    ///
    /// * `returns` - Per-period returns of the series
    /// * `risk_free` - Per-period risk-free returns, aligned with `returns`
    /// * `series` - Which series this is, used to tag errors
    /// * `config` - Annualization settings
    ///
    /// # Errors
    ///
    /// [`TacticalError::ZeroVolatility`] when every return is identical,
    /// [`TacticalError::InsufficientData`] for an empty series and
    /// [`TacticalError::InvalidData`] when the inputs are misaligned.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use tactical_eval::{RiskStats, ScoreConfig};
    /// use tactical_traits::ReturnSeries;
    ///
    /// let stats = RiskStats::compute(&returns, &risk_free, ReturnSeries::Market, &ScoreConfig::default())?;
    /// println!("Sharpe: {:.3}", stats.sharpe);
    /// ```
    pub fn compute(
        returns: &Array1<f64>,
        risk_free: &Array1<f64>,
        series: ReturnSeries,
        config: &ScoreConfig,
    ) -> Result<Self> {
        if returns.len() != risk_free.len() {
            return Err(TacticalError::InvalidData(format!(
                "{series} returns have {} periods but risk-free rates have {}",
                returns.len(),
                risk_free.len()
            )));
        }
        if returns.is_empty() {
            return Err(TacticalError::InsufficientData(format!(
                "{series} return series is empty"
            )));
        }

        let excess = returns - risk_free;
        let mean = compounded_mean(&excess);
        if mean.kind == MeanKind::Arithmetic {
            warn!(
                %series,
                cumulative = mean.cumulative,
                "cumulative excess growth is not positive; using arithmetic mean"
            );
        }

        let volatility = population_std(returns);
        if volatility == 0.0 {
            return Err(TacticalError::ZeroVolatility(series));
        }

        let sqrt_periods = config.annualization_factor();
        let annualized_volatility = volatility * sqrt_periods * config.percent_scale;
        let sharpe = mean.value / volatility * sqrt_periods;

        debug!(
            %series,
            mean_excess = mean.value,
            mean_kind = ?mean.kind,
            volatility,
            annualized_volatility,
            sharpe,
            "computed risk statistics"
        );

        Ok(Self {
            series,
            mean_excess_return: mean.value,
            mean_kind: mean.kind,
            volatility,
            annualized_volatility,
            sharpe,
        })
    }
}
