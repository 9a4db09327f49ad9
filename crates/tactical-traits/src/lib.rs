#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tactical/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for the tactical scoring workspace.
//!
//! This crate provides the foundational pieces shared by the scorer, the data
//! loaders and the baseline predictors.

/// The version of the tactical-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod predictor;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{Result, TacticalError};
pub use predictor::Predictor;
pub use stats::{CompoundedMean, Describe, MeanKind};
pub use types::{
    DATE_ID, Dataset, FORWARD_RETURNS, LAGGED_FORWARD_RETURNS, PREDICTION, RISK_FREE_RATE,
    ReturnSeries,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
