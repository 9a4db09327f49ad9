//! Statistical helpers shared by the scoring pipeline and the diagnostics.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// How a per-period mean excess return was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeanKind {
    /// `(Π(1 + x))^(1/n) - 1`, used when cumulative growth is positive.
    Geometric,
    /// Plain average, used when cumulative growth is zero or negative.
    Arithmetic,
}

/// Per-period mean of a compounded excess-return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundedMean {
    /// The mean per-period excess return.
    pub value: f64,
    /// Whether the geometric mean was defined for this series.
    pub kind: MeanKind,
    /// Cumulative growth factor `Π(1 + x)`.
    pub cumulative: f64,
}

/// Compute the per-period geometric mean of `excess`, falling back to the
/// arithmetic mean when the cumulative growth factor is not positive.
///
/// A NaN growth factor also takes the arithmetic branch.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use tactical_traits::stats::{compounded_mean, MeanKind};
///
/// let mean = compounded_mean(&array![0.1, 0.1]);
/// assert_eq!(mean.kind, MeanKind::Geometric);
/// assert!((mean.value - 0.1).abs() < 1e-12);
///
/// let wipeout = compounded_mean(&array![-1.5, 0.2]);
/// assert_eq!(wipeout.kind, MeanKind::Arithmetic);
/// ```
pub fn compounded_mean(excess: &Array1<f64>) -> CompoundedMean {
    let cumulative = excess.mapv(|x| 1.0 + x).product();
    let n = excess.len() as f64;

    if cumulative > 0.0 {
        CompoundedMean {
            value: cumulative.powf(1.0 / n) - 1.0,
            kind: MeanKind::Geometric,
            cumulative,
        }
    } else {
        CompoundedMean {
            value: excess.mean().unwrap_or(f64::NAN),
            kind: MeanKind::Arithmetic,
            cumulative,
        }
    }
}

/// Population standard deviation (N denominator).
///
/// Returns NaN for an empty series.
pub fn population_std(values: &Array1<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.std(0.0)
}

/// Linear-interpolated quantile of an ascending slice, `q` in `[0, 1]`.
///
/// Returns NaN for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Summary statistics in the layout of a `describe()` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    /// Number of finite observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator).
    pub std: f64,
    /// Minimum.
    pub min: f64,
    /// `(q, value)` pairs for each requested quantile.
    pub quantiles: Vec<(f64, f64)>,
    /// Maximum.
    pub max: f64,
}

impl Describe {
    /// Summarize `values`, ignoring non-finite entries.
    pub fn from_values(values: &[f64], quantiles: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = if count > 0 {
            sorted.iter().sum::<f64>() / count as f64
        } else {
            f64::NAN
        };
        let std = if count > 1 {
            let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            quantiles: quantiles
                .iter()
                .map(|&q| (q, quantile_sorted(&sorted, q)))
                .collect(),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_compounded_mean_geometric() {
        let excess = array![0.01, -0.02, 0.015];
        let mean = compounded_mean(&excess);
        let expected = (1.01_f64 * 0.98 * 1.015).powf(1.0 / 3.0) - 1.0;
        assert_eq!(mean.kind, MeanKind::Geometric);
        assert_relative_eq!(mean.value, expected, epsilon = 1e-15);
        assert_relative_eq!(mean.cumulative, 1.01 * 0.98 * 1.015, epsilon = 1e-15);
    }

    #[test]
    fn test_compounded_mean_falls_back_on_wipeout() {
        let excess = array![0.5, -1.0, 0.25];
        let mean = compounded_mean(&excess);
        assert_eq!(mean.kind, MeanKind::Arithmetic);
        assert_eq!(mean.cumulative, 0.0);
        assert_relative_eq!(mean.value, (0.5 - 1.0 + 0.25) / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_compounded_mean_falls_back_on_negative_growth() {
        let excess = array![-1.2, 0.1];
        let mean = compounded_mean(&excess);
        assert_eq!(mean.kind, MeanKind::Arithmetic);
        assert!(mean.cumulative < 0.0);
        assert_relative_eq!(mean.value, -0.55, epsilon = 1e-15);
    }

    #[test]
    fn test_population_std() {
        let values = array![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(population_std(&values), 1.25_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(population_std(&array![0.3, 0.3, 0.3]), 0.0);
        assert!(population_std(&Array1::<f64>::zeros(0)).is_nan());
    }

    #[test]
    fn test_quantile_sorted() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile_sorted(&sorted, 0.5), 2.5);
        assert_relative_eq!(quantile_sorted(&sorted, 0.25), 1.75);
        assert_relative_eq!(quantile_sorted(&sorted, 1.0), 4.0);
        assert_relative_eq!(quantile_sorted(&[7.0], 0.9), 7.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn test_describe() {
        let values = [0.0, 2.0, 4.0, f64::NAN, 6.0];
        let summary = Describe::from_values(&values, &[0.25, 0.5, 0.75]);
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.mean, 3.0);
        assert_relative_eq!(summary.std, (20.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 6.0);
        assert_eq!(summary.quantiles.len(), 3);
        assert_relative_eq!(summary.quantiles[1].1, 3.0);
    }

    #[test]
    fn test_describe_empty() {
        let summary = Describe::from_values(&[], &[0.5]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.min.is_nan());
        assert!(summary.quantiles[0].1.is_nan());
    }
}
