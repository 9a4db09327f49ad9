//! Predictor registry for discovering and constructing baseline predictors.

use serde::{Deserialize, Serialize};
use tactical_traits::{Predictor, Result, TacticalError};

use crate::constant::ConstantWeight;
use crate::momentum::{LaggedMomentumConfig, LaggedMomentumRule};

/// Metadata about a predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorInfo {
    /// Unique identifier for the predictor
    pub name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// Whether the predictor reads the lagged market return from the test set
    pub uses_lagged_returns: bool,

    /// Whether the predictor reads the training set
    pub uses_training_data: bool,
}

/// Settings for every registered predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorSettings {
    /// Lagged momentum rule settings
    pub lagged_momentum: LaggedMomentumConfig,
    /// Weight held by the constant predictor
    pub constant_weight: f64,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            lagged_momentum: LaggedMomentumConfig::default(),
            constant_weight: 1.0,
        }
    }
}

/// Get information about all available predictors.
#[must_use]
pub fn available_predictors() -> Vec<PredictorInfo> {
    vec![
        PredictorInfo {
            name: "lagged_momentum",
            description: "1.2 after a positive lagged market return, 0.8 otherwise",
            uses_lagged_returns: true,
            uses_training_data: true,
        },
        PredictorInfo {
            name: "constant",
            description: "Same portfolio weight every period (1.0 tracks the market)",
            uses_lagged_returns: false,
            uses_training_data: false,
        },
    ]
}

/// Get information about a specific predictor by name.
#[must_use]
pub fn get_predictor_info(name: &str) -> Option<PredictorInfo> {
    available_predictors()
        .into_iter()
        .find(|info| info.name == name)
}

/// Construct the predictor registered under `name`.
///
/// # Errors
///
/// [`TacticalError::PredictorNotFound`] for an unknown name.
pub fn create_predictor(name: &str, settings: &PredictorSettings) -> Result<Box<dyn Predictor>> {
    match name {
        "lagged_momentum" => Ok(Box::new(LaggedMomentumRule::new(
            settings.lagged_momentum.clone(),
        ))),
        "constant" => Ok(Box::new(ConstantWeight::new(settings.constant_weight))),
        _ => Err(TacticalError::PredictorNotFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_predictors() {
        let predictors = available_predictors();
        assert_eq!(predictors.len(), 2);
        assert!(predictors.iter().any(|p| p.name == "lagged_momentum"));
    }

    #[test]
    fn test_get_predictor_info() {
        let info = get_predictor_info("constant").unwrap();
        assert!(!info.uses_lagged_returns);
        assert!(get_predictor_info("nonexistent").is_none());
    }

    #[test]
    fn test_create_predictor_matches_registry() {
        let settings = PredictorSettings::default();
        for info in available_predictors() {
            let predictor = create_predictor(info.name, &settings).unwrap();
            assert_eq!(predictor.name(), info.name);
        }
    }

    #[test]
    fn test_unknown_predictor() {
        let Err(err) = create_predictor("random_forest", &PredictorSettings::default()) else {
            panic!("random_forest should not be registered");
        };
        assert!(matches!(err, TacticalError::PredictorNotFound(name) if name == "random_forest"));
    }
}
