//! Predictor trait for producing portfolio-weight forecasts.
//!
//! A predictor reads a test dataset (one row per period to forecast) and, if
//! it needs history, the training dataset, and returns one portfolio weight
//! per test row. Weights are interpreted by the scorer as the fraction of
//! capital held in the market: 0 is all cash, 1 is fully invested and 2 is
//! twice levered.

use crate::{Dataset, Result};
use ndarray::Array1;

/// Produces one portfolio weight per test row.
///
/// Implementations must be thread-safe (`Send + Sync`) so that several
/// predictors can run side by side.
///
/// # Example
///
/// ```no_run
/// use ndarray::Array1;
/// use tactical_traits::{Dataset, Predictor, Result};
///
/// struct FullyInvested;
///
/// impl Predictor for FullyInvested {
///     fn name(&self) -> &str {
///         "fully_invested"
///     }
///
///     fn predict(&self, test: &Dataset, _train: &Dataset) -> Result<Array1<f64>> {
///         Ok(Array1::ones(test.len()))
///     }
/// }
/// ```
pub trait Predictor: Send + Sync {
    /// Returns the unique name of this predictor.
    fn name(&self) -> &str;

    /// Computes portfolio weights for every row of `test`.
    ///
    /// The returned array has exactly `test.len()` entries, in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if a column the predictor relies on is unusable or
    /// the training data cannot support the forecast.
    fn predict(&self, test: &Dataset, train: &Dataset) -> Result<Array1<f64>>;

    /// Columns the predictor reads from the test dataset when present.
    fn input_columns(&self) -> &[&str] {
        &[]
    }
}
