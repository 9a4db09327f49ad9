//! Constant-weight baseline.

use ndarray::Array1;
use tactical_traits::{Dataset, Predictor, Result};

use crate::submission::clip_weights;

/// Holds the same weight in every period, clipped to `[0, 2]`.
///
/// A weight of 1 reproduces the market and is the natural benchmark for any
/// timing strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantWeight {
    weight: f64,
}

impl ConstantWeight {
    /// Create a predictor that always returns `weight`.
    #[must_use]
    pub const fn new(weight: f64) -> Self {
        Self { weight }
    }

    /// The configured weight, before clipping.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

impl Default for ConstantWeight {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Predictor for ConstantWeight {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, test: &Dataset, _train: &Dataset) -> Result<Array1<f64>> {
        Ok(clip_weights(
            &Array1::from_elem(test.len(), self.weight),
            0.0,
            2.0,
        ))
    }
}
