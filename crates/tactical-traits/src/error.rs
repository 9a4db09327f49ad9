//! Error types for the tactical workspace.
//!
//! The first four variants of [`TacticalError`] are the scoring failures a
//! submission can trigger. Callers usually treat them as "this submission
//! cannot be scored". The remaining variants cover loading, configuration and
//! predictor lookup.

use crate::types::ReturnSeries;
use thiserror::Error;

/// The main error type for tactical operations.
#[derive(Debug, Error)]
pub enum TacticalError {
    /// A solution row has no usable prediction after the join.
    #[error("Missing predictions for {count} row(s) after merge")]
    MissingPrediction {
        /// Number of solution rows without a prediction.
        count: usize,
    },

    /// The prediction column is not numeric.
    #[error("Predictions must be numeric, found dtype {dtype}")]
    InvalidPredictionType {
        /// Name of the offending dtype.
        dtype: String,
    },

    /// At least one prediction lies outside the allowed weight range.
    #[error("Predictions out of bounds [{lower}, {upper}]: observed range [{min}, {max}]")]
    OutOfBounds {
        /// Smallest observed prediction.
        min: f64,
        /// Largest observed prediction.
        max: f64,
        /// Lower bound of the allowed range.
        lower: f64,
        /// Upper bound of the allowed range.
        upper: f64,
    },

    /// A return series has zero standard deviation.
    #[error("{0} std is zero")]
    ZeroVolatility(ReturnSeries),

    /// More than one submission row matched the same solution identifier.
    #[error("Duplicate identifiers in submission: {count} extra row(s) after merge")]
    DuplicateIdentifier {
        /// Number of surplus rows produced by the join.
        count: usize,
    },

    /// A required column is missing from a dataset.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Not enough rows for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No predictor is registered under the requested name.
    #[error("Predictor not found: {0}")]
    PredictorNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl TacticalError {
    /// Returns `true` for the failures that mean a submission cannot be scored.
    #[must_use]
    pub const fn is_scoring_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPrediction { .. }
                | Self::InvalidPredictionType { .. }
                | Self::OutOfBounds { .. }
                | Self::ZeroVolatility(_)
                | Self::DuplicateIdentifier { .. }
        )
    }
}

impl From<String> for TacticalError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for TacticalError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for tactical operations.
pub type Result<T> = std::result::Result<T, TacticalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TacticalError::MissingPrediction { count: 3 };
        assert_eq!(err.to_string(), "Missing predictions for 3 row(s) after merge");

        let err = TacticalError::ZeroVolatility(ReturnSeries::Strategy);
        assert_eq!(err.to_string(), "strategy std is zero");

        let err = TacticalError::ZeroVolatility(ReturnSeries::Market);
        assert_eq!(err.to_string(), "market std is zero");

        let err = TacticalError::MissingColumn("prediction".to_string());
        assert_eq!(err.to_string(), "Missing required column: prediction");
    }

    #[test]
    fn test_scoring_error_classification() {
        assert!(TacticalError::MissingPrediction { count: 1 }.is_scoring_error());
        assert!(
            TacticalError::InvalidPredictionType {
                dtype: "str".to_string()
            }
            .is_scoring_error()
        );
        assert!(
            TacticalError::OutOfBounds {
                min: -0.1,
                max: 1.0,
                lower: 0.0,
                upper: 2.0
            }
            .is_scoring_error()
        );
        assert!(TacticalError::ZeroVolatility(ReturnSeries::Market).is_scoring_error());
        assert!(!TacticalError::MissingColumn("id".to_string()).is_scoring_error());
        assert!(!TacticalError::Config("bad".to_string()).is_scoring_error());
    }

    #[test]
    fn test_error_from_string() {
        let err: TacticalError = "boom".into();
        assert!(matches!(err, TacticalError::Other(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(TacticalError::Other("fail".to_string()));
        assert!(err_result.is_err());
    }
}
