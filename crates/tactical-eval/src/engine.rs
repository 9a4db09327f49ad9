//! The scoring pipeline: merge, strategy returns, risk statistics, penalties
//! and the capped adjusted Sharpe ratio.

use ndarray::Array1;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tactical_traits::{Result, ReturnSeries};
use tracing::{info, warn};

use crate::config::ScoreConfig;
use crate::merge::{JoinedFrame, merge};
use crate::penalty::Penalties;
use crate::returns::strategy_returns;
use crate::risk::RiskStats;

/// Every intermediate quantity behind one score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Number of scored periods
    pub n_periods: usize,
    /// Statistics of the strategy implied by the predictions
    pub strategy: RiskStats,
    /// Statistics of the raw market
    pub market: RiskStats,
    /// Volatility and return penalties
    pub penalties: Penalties,
    /// Penalized Sharpe before the cap
    pub uncapped_score: f64,
    /// Whether the cap replaced the penalized Sharpe
    pub capped: bool,
    /// Final adjusted Sharpe ratio
    pub adjusted_sharpe: f64,
}

/// Scores forecasts with the volatility- and shortfall-penalized Sharpe ratio.
///
/// The engine holds only its configuration, so one instance can be shared
/// across threads and reused for any number of submissions.
///
/// # Example
///
/// ```rust,ignore
/// use tactical_eval::{ScoreConfig, ScoreEngine};
///
/// let engine = ScoreEngine::new(ScoreConfig::default());
/// let breakdown = engine.evaluate(&solution, &submission, "date_id")?;
/// println!("Adjusted Sharpe: {:.4}", breakdown.adjusted_sharpe);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoreConfig,
}

impl ScoreEngine {
    /// Create an engine with the given configuration.
    pub const fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score `submission` against `solution`, joining on `id_key`.
    ///
    /// # Errors
    ///
    /// Any validation or degenerate-volatility failure aborts the call; see
    /// [`merge`] and [`RiskStats::compute`].
    pub fn score(&self, solution: &DataFrame, submission: &DataFrame, id_key: &str) -> Result<f64> {
        self.evaluate(solution, submission, id_key)
            .map(|breakdown| breakdown.adjusted_sharpe)
    }

    /// Like [`ScoreEngine::score`], returning every intermediate quantity.
    ///
    /// # Errors
    ///
    /// See [`ScoreEngine::score`].
    pub fn evaluate(
        &self,
        solution: &DataFrame,
        submission: &DataFrame,
        id_key: &str,
    ) -> Result<ScoreBreakdown> {
        let joined = merge(solution, submission, id_key, &self.config)?;
        self.evaluate_joined(&joined)
    }

    /// Score predictions already aligned with their realized returns.
    ///
    /// # Errors
    ///
    /// See [`JoinedFrame::from_arrays`] and [`RiskStats::compute`].
    pub fn evaluate_series(
        &self,
        prediction: Array1<f64>,
        forward_returns: Array1<f64>,
        risk_free_rate: Array1<f64>,
    ) -> Result<ScoreBreakdown> {
        let joined =
            JoinedFrame::from_arrays(prediction, forward_returns, risk_free_rate, &self.config)?;
        self.evaluate_joined(&joined)
    }

    /// Run the pipeline on a validated joined set.
    ///
    /// # Errors
    ///
    /// [`tactical_traits::TacticalError::ZeroVolatility`] when the strategy or
    /// market returns are constant.
    pub fn evaluate_joined(&self, joined: &JoinedFrame) -> Result<ScoreBreakdown> {
        let strategy_returns = strategy_returns(joined);

        let strategy = RiskStats::compute(
            &strategy_returns,
            joined.risk_free_rate(),
            ReturnSeries::Strategy,
            &self.config,
        )?;
        let market = RiskStats::compute(
            joined.forward_returns(),
            joined.risk_free_rate(),
            ReturnSeries::Market,
            &self.config,
        )?;

        let penalties = Penalties::compute(&strategy, &market, &self.config)?;
        let uncapped_score = strategy.sharpe / penalties.total();
        let (adjusted_sharpe, capped) = cap_score(uncapped_score, self.config.score_cap);

        if capped {
            warn!(
                uncapped_score,
                cap = self.config.score_cap,
                "adjusted sharpe exceeded the cap"
            );
        }
        info!(
            n_periods = joined.len(),
            strategy_sharpe = strategy.sharpe,
            market_sharpe = market.sharpe,
            adjusted_sharpe,
            "scored submission"
        );

        Ok(ScoreBreakdown {
            n_periods: joined.len(),
            strategy,
            market,
            penalties,
            uncapped_score,
            capped,
            adjusted_sharpe,
        })
    }
}

/// Clamp `score` from above. NaN passes through unchanged.
fn cap_score(score: f64, cap: f64) -> (f64, bool) {
    if score > cap { (cap, true) } else { (score, false) }
}

/// Score `submission` against `solution` with the default configuration.
///
/// # Errors
///
/// See [`ScoreEngine::score`].
///
/// # Example
///
/// ```rust,ignore
/// let adjusted_sharpe = tactical_eval::score(&solution, &submission, "date_id")?;
/// ```
pub fn score(solution: &DataFrame, submission: &DataFrame, id_key: &str) -> Result<f64> {
    ScoreEngine::default().score(solution, submission, id_key)
}
