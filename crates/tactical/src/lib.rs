#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tactical/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Quick Start
//!
//! ```ignore
//! use tactical::{Predictor, Result, score};
//! use tactical::data::read_csv;
//! use tactical::signals::{LaggedMomentumRule, build_submission};
//!
//! # fn main() -> Result<()> {
//! let train = read_csv("data/train.csv")?;
//! let test = read_csv("data/test.csv")?;
//!
//! let weights = LaggedMomentumRule::default().predict(&test, &train)?;
//! let submission = build_submission(&test, "date_id", &weights)?;
//!
//! let adjusted_sharpe = score(solution.data(), &submission, "date_id")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Scoring pipeline
//!
//! 1. **Merge** the submission onto the solution by identifier and validate
//!    the predictions
//! 2. **Strategy returns**: `rfr * (1 - w) + w * forward_return`
//! 3. **Risk statistics** for the strategy and for the market
//! 4. **Penalties** for excess volatility and return shortfall
//! 5. **Aggregate** into the capped adjusted Sharpe
//!
//! ```text
//! adjusted = sharpe / (vol_penalty * return_penalty), capped at 1e6
//! ```

/// Version information for the tactical crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and traits.
///
/// - [`Predictor`] - Produces one portfolio weight per test row
/// - [`Dataset`] - DataFrame wrapper used for every input
/// - [`TacticalError`] - The workspace's error type
pub mod traits {
    pub use tactical_traits::*;
}

pub use tactical_traits::{Dataset, Predictor, Result, ReturnSeries, TacticalError};

// ============================================================================
// Scoring
// ============================================================================

/// The adjusted-Sharpe scorer.
///
/// ## Volatility penalty
///
/// ```text
/// excess_vol  = max(0, strategy_vol / market_vol - 1.2)
/// vol_penalty = 1 + excess_vol
/// ```
///
/// ## Return penalty
///
/// ```text
/// return_gap     = max(0, (market_mean - strategy_mean) * 100 * 252)
/// return_penalty = 1 + return_gap² / 100
/// ```
///
/// # Example
///
/// ```ignore
/// use tactical::eval::ScoreEngine;
///
/// let breakdown = ScoreEngine::default().evaluate(&solution, &submission, "date_id")?;
/// println!("strategy sharpe {:.3}", breakdown.strategy.sharpe);
/// println!("adjusted sharpe {:.3}", breakdown.adjusted_sharpe);
/// ```
pub mod eval {
    pub use tactical_eval::*;
}

pub use tactical_eval::{ScoreBreakdown, ScoreConfig, ScoreEngine, score};

// ============================================================================
// Data
// ============================================================================

/// CSV I/O, inspection and missing-value diagnostics.
pub mod data {
    pub use tactical_data::*;
}

// ============================================================================
// Baseline Predictors
// ============================================================================

/// Rule-based predictors and submission files.
pub mod signals {
    pub use tactical_signals::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tactical::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Dataset, Predictor, Result, ScoreConfig, ScoreEngine, TacticalError, score};
}
