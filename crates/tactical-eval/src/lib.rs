//! Adjusted-Sharpe scoring for tactical allocation forecasts.
//!
//! A forecast is a portfolio weight in `[0, 2]` per period. This crate turns
//! those weights into strategy returns, compares the strategy's risk-adjusted
//! performance with the market's, and produces a single score:
//! - Merge and validation of a submission against the realized solution
//! - Strategy returns for cash, market and levered positions
//! - Geometric mean excess return, volatility and Sharpe ratio
//! - Penalties for excess volatility and for underperforming the market
//!
//! # Example
//!
//! ```rust,ignore
//! use tactical_eval::{ScoreConfig, ScoreEngine, score};
//!
//! // One-shot scoring with the competition constants
//! let adjusted_sharpe = score(&solution, &submission, "date_id")?;
//!
//! // Full breakdown with a custom configuration
//! let engine = ScoreEngine::new(ScoreConfig::default());
//! let breakdown = engine.evaluate(&solution, &submission, "date_id")?;
//! println!("{:.4} (vol penalty {:.3})", breakdown.adjusted_sharpe, breakdown.penalties.vol_penalty);
//! ```

pub mod config;
pub mod engine;
pub mod merge;
pub mod penalty;
pub mod returns;
pub mod risk;

// Re-export main types
pub use config::ScoreConfig;
pub use engine::{ScoreBreakdown, ScoreEngine, score};
pub use merge::{JoinedFrame, JoinedRow, merge};
pub use penalty::Penalties;
pub use returns::{strategy_return, strategy_returns};
pub use risk::RiskStats;
