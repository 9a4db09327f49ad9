//! Scoring configuration.
//!
//! The defaults reproduce the competition's scoring rule. Changing them gives
//! a different metric, which is useful for sensitivity studies but not for
//! leaderboard comparison.

use serde::{Deserialize, Serialize};

/// Configuration for the adjusted-Sharpe computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Number of trading periods per year used for annualization
    pub trading_days_per_year: usize,
    /// Strategy/market volatility ratio allowed before the volatility penalty starts
    pub volatility_tolerance: f64,
    /// Multiplier turning fractional returns into percentages
    pub percent_scale: f64,
    /// Divisor applied to the squared return gap
    pub return_penalty_scale: f64,
    /// Smallest allowed prediction (portfolio weight)
    pub min_prediction: f64,
    /// Largest allowed prediction (portfolio weight)
    pub max_prediction: f64,
    /// Upper bound on the final score
    pub score_cap: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252,
            volatility_tolerance: 1.2,
            percent_scale: 100.0,
            return_penalty_scale: 100.0,
            min_prediction: 0.0,
            max_prediction: 2.0,
            score_cap: 1_000_000.0,
        }
    }
}

impl ScoreConfig {
    /// `sqrt(trading_days_per_year)`, the factor that annualizes a per-period ratio.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        (self.trading_days_per_year as f64).sqrt()
    }

    /// Whether `weight` lies inside the allowed prediction range.
    #[must_use]
    pub fn allows(&self, weight: f64) -> bool {
        weight >= self.min_prediction && weight <= self.max_prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_score_config_default() {
        let config = ScoreConfig::default();
        assert_eq!(config.trading_days_per_year, 252);
        assert_eq!(config.volatility_tolerance, 1.2);
        assert_eq!(config.percent_scale, 100.0);
        assert_eq!(config.return_penalty_scale, 100.0);
        assert_eq!(config.min_prediction, 0.0);
        assert_eq!(config.max_prediction, 2.0);
        assert_eq!(config.score_cap, 1_000_000.0);
    }

    #[test]
    fn test_annualization_factor() {
        let config = ScoreConfig::default();
        assert_relative_eq!(config.annualization_factor(), 252.0_f64.sqrt());
    }

    #[test]
    fn test_allows() {
        let config = ScoreConfig::default();
        assert!(config.allows(0.0));
        assert!(config.allows(2.0));
        assert!(config.allows(1.2));
        assert!(!config.allows(2.5));
        assert!(!config.allows(-0.1));
        assert!(!config.allows(f64::NAN));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ScoreConfig =
            serde_json::from_str(r#"{"volatility_tolerance": 1.5}"#).unwrap();
        assert_eq!(config.volatility_tolerance, 1.5);
        assert_eq!(config.trading_days_per_year, 252);
    }
}
