//! Penalties for excess risk and for underperforming the market.

use serde::{Deserialize, Serialize};
use tactical_traits::{Result, ReturnSeries, TacticalError};
use tracing::debug;

use crate::config::ScoreConfig;
use crate::risk::RiskStats;

/// Multiplicative penalties applied to the strategy's Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalties {
    /// Volatility ratio above the tolerance, floored at zero
    pub excess_vol: f64,
    /// `1 + excess_vol`
    pub vol_penalty: f64,
    /// Annualized, percent-scaled shortfall of mean excess return vs. the market
    pub return_gap: f64,
    /// `1 + return_gap² / scale`
    pub return_penalty: f64,
}

impl Penalties {
    /// Derive both penalties from the strategy and market statistics.
    ///
    /// Strategy volatility up to `volatility_tolerance` times the market's is
    /// free; beyond that the penalty grows linearly. Only underperformance is
    /// penalized, and quadratically in the gap. The gap is scaled by the
    /// number of periods per year (not its square root).
    ///
    /// # Errors
    ///
    /// [`TacticalError::ZeroVolatility`] for the market when its annualized
    /// volatility is zero.
    pub fn compute(strategy: &RiskStats, market: &RiskStats, config: &ScoreConfig) -> Result<Self> {
        if market.annualized_volatility == 0.0 {
            return Err(TacticalError::ZeroVolatility(ReturnSeries::Market));
        }

        let vol_ratio = strategy.annualized_volatility / market.annualized_volatility;
        let excess_vol = (vol_ratio - config.volatility_tolerance).max(0.0);
        let vol_penalty = 1.0 + excess_vol;

        let return_gap = ((market.mean_excess_return - strategy.mean_excess_return)
            * config.percent_scale
            * config.trading_days_per_year as f64)
            .max(0.0);
        let return_penalty = 1.0 + return_gap.powi(2) / config.return_penalty_scale;

        debug!(
            vol_ratio,
            excess_vol, vol_penalty, return_gap, return_penalty, "computed penalties"
        );

        Ok(Self {
            excess_vol,
            vol_penalty,
            return_gap,
            return_penalty,
        })
    }

    /// Combined divisor applied to the Sharpe ratio.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.vol_penalty * self.return_penalty
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tactical_traits::MeanKind;

    pub(crate) fn stats(series: ReturnSeries, mean_excess: f64, annual_vol: f64, sharpe: f64) -> RiskStats {
        RiskStats {
            series,
            mean_excess_return: mean_excess,
            mean_kind: MeanKind::Geometric,
            volatility: annual_vol / (252.0_f64.sqrt() * 100.0),
            annualized_volatility: annual_vol,
            sharpe,
        }
    }

    #[test]
    fn test_no_penalty_when_matching_market() {
        let market = stats(ReturnSeries::Market, 0.0004, 16.0, 0.9);
        let strategy = stats(ReturnSeries::Strategy, 0.0004, 16.0, 0.9);
        let penalties = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap();

        assert_eq!(penalties.excess_vol, 0.0);
        assert_eq!(penalties.vol_penalty, 1.0);
        assert_eq!(penalties.return_gap, 0.0);
        assert_eq!(penalties.return_penalty, 1.0);
        assert_eq!(penalties.total(), 1.0);
    }

    #[test]
    fn test_volatility_tolerance() {
        let market = stats(ReturnSeries::Market, 0.0004, 10.0, 0.9);

        // 1.2x market volatility is still free.
        let strategy = stats(ReturnSeries::Strategy, 0.0004, 12.0, 0.9);
        let penalties = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap();
        assert_relative_eq!(penalties.vol_penalty, 1.0, epsilon = 1e-12);

        let strategy = stats(ReturnSeries::Strategy, 0.0004, 15.0, 0.9);
        let penalties = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap();
        assert_relative_eq!(penalties.excess_vol, 0.3, epsilon = 1e-12);
        assert_relative_eq!(penalties.vol_penalty, 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_return_gap_is_quadratic() {
        let market = stats(ReturnSeries::Market, 0.0005, 10.0, 0.9);
        let strategy = stats(ReturnSeries::Strategy, 0.0003, 10.0, 0.6);
        let penalties = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap();

        // 0.0002 * 100 * 252 = 5.04
        assert_relative_eq!(penalties.return_gap, 5.04, epsilon = 1e-9);
        assert_relative_eq!(penalties.return_penalty, 1.0 + 5.04 * 5.04 / 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outperformance_is_not_penalized() {
        let market = stats(ReturnSeries::Market, 0.0002, 10.0, 0.5);
        let strategy = stats(ReturnSeries::Strategy, 0.0009, 10.0, 1.5);
        let penalties = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap();
        assert_eq!(penalties.return_gap, 0.0);
        assert_eq!(penalties.return_penalty, 1.0);
    }

    #[test]
    fn test_zero_market_volatility() {
        let market = stats(ReturnSeries::Market, 0.0002, 0.0, 0.5);
        let strategy = stats(ReturnSeries::Strategy, 0.0002, 10.0, 0.5);
        let err = Penalties::compute(&strategy, &market, &ScoreConfig::default()).unwrap_err();
        assert!(matches!(err, TacticalError::ZeroVolatility(ReturnSeries::Market)));
    }
}
