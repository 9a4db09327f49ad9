//! Strategy returns implied by a portfolio weight.
//!
//! A weight of 0 holds cash and earns the risk-free rate. A weight of 1 holds
//! the market. Weights above 1 hold a levered market position, financed at
//! the risk-free rate.

use ndarray::{Array1, Zip};

use crate::merge::JoinedFrame;

/// Return of holding `position` in the market and `1 - position` in cash.
#[inline]
pub fn strategy_return(position: f64, forward_return: f64, risk_free_rate: f64) -> f64 {
    risk_free_rate * (1.0 - position) + position * forward_return
}

/// Per-period strategy returns for every row of a joined set.
pub fn strategy_returns(joined: &JoinedFrame) -> Array1<f64> {
    Zip::from(joined.prediction())
        .and(joined.forward_returns())
        .and(joined.risk_free_rate())
        .map_collect(|&position, &forward, &risk_free| strategy_return(position, forward, risk_free))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreConfig;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_full_exposure_tracks_market_exactly() {
        for (forward, risk_free) in [(0.01, 0.0001), (-0.037, 0.0002), (0.0, -0.0001)] {
            assert_eq!(strategy_return(1.0, forward, risk_free), forward);
        }
    }

    #[test]
    fn test_zero_exposure_earns_risk_free_exactly() {
        for (forward, risk_free) in [(0.01, 0.0001), (-0.037, 0.0002), (0.05, -0.0001)] {
            assert_eq!(strategy_return(0.0, forward, risk_free), risk_free);
        }
    }

    #[test]
    fn test_leverage() {
        // 2x: twice the market return minus one unit of financing.
        assert_relative_eq!(strategy_return(2.0, 0.01, 0.0001), 0.0199, epsilon = 1e-15);
        assert_relative_eq!(strategy_return(0.5, 0.01, 0.0001), 0.00505, epsilon = 1e-15);
    }

    #[test]
    fn test_strategy_returns_over_joined_set() {
        let joined = JoinedFrame::from_arrays(
            array![1.0, 0.0, 2.0],
            array![0.01, -0.02, 0.015],
            array![0.0001, 0.0001, 0.0001],
            &ScoreConfig::default(),
        )
        .unwrap();

        let returns = strategy_returns(&joined);
        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.01);
        assert_eq!(returns[1], 0.0001);
        assert_relative_eq!(returns[2], 0.0299, epsilon = 1e-15);

        let from_rows: Vec<f64> = joined.rows().map(|row| row.strategy_return).collect();
        assert_eq!(from_rows, returns.to_vec());
    }
}
