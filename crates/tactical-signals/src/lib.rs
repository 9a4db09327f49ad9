//! Baseline predictors for tactical allocation.
//!
//! This crate provides simple rule-based forecasters that serve as sanity
//! checks before any model is trained:
//! - Lagged momentum: overweight after an up period, underweight otherwise
//! - Constant weight: a fixed exposure, 1.0 being the market itself
//!
//! Every predictor returns portfolio weights clipped to `[0, 2]`.
//!
//! # Example
//!
//! ```ignore
//! use tactical_signals::{LaggedMomentumRule, write_submission};
//! use tactical_traits::Predictor;
//!
//! let rule = LaggedMomentumRule::default();
//! let weights = rule.predict(&test, &train)?;
//! write_submission(&test, "date_id", &weights, "submissions/rule_pred.csv")?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod constant;
pub mod momentum;
pub mod registry;
pub mod submission;

// Re-export key types
pub use constant::ConstantWeight;
pub use momentum::{LaggedMomentumConfig, LaggedMomentumRule};
pub use registry::{
    PredictorInfo, PredictorSettings, available_predictors, create_predictor, get_predictor_info,
};
pub use submission::{build_submission, clip_weights, write_submission};
