//! Descriptive statistics underlying the goodness-of-fit metrics.
//!
//! Every function validates its input (non-empty, all values finite) and
//! reports problems through [`GofError`] instead of returning NaN.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation for O(ε) error independent of n.
//! - **Variance/StdDev**: Welford's online algorithm, population convention
//!   (denominator `n`). A constant sequence yields exactly zero.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Median**: lower-middle element of a sorted copy.

use crate::error::{GofError, Result};

/// Returns `Err(NonFiniteInput)` for the first NaN/Inf in `data`.
pub(crate) fn ensure_finite(data: &[f64]) -> Result<()> {
    match data.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(GofError::NonFiniteInput {
            index,
            value: data[index],
        }),
        None => Ok(()),
    }
}

/// Checks that `data` is non-empty and finite. `what` names the sequence
/// in the resulting error.
pub(crate) fn ensure_sample(data: &[f64], what: &'static str) -> Result<()> {
    if data.is_empty() {
        return Err(GofError::EmptyInput { what });
    }
    ensure_finite(data)
}

/// Checks that two paired sequences have equal length.
pub(crate) fn ensure_paired(observed: &[f64], simulated: &[f64]) -> Result<()> {
    if observed.len() != simulated.len() {
        return Err(GofError::LengthMismatch {
            observed: observed.len(),
            simulated: simulated.len(),
        });
    }
    Ok(())
}

/// Computes the arithmetic mean using compensated summation.
///
/// # Errors
/// - [`GofError::EmptyInput`] if `data` is empty.
/// - [`GofError::NonFiniteInput`] if `data` contains NaN/Inf.
///
/// # Examples
/// ```
/// use hydro_gof::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// assert!(mean(&[]).is_err());
/// ```
pub fn mean(data: &[f64]) -> Result<f64> {
    ensure_sample(data, "input")?;
    Ok(kahan_sum(data) / data.len() as f64)
}

/// Computes the population variance (denominator `n`).
///
/// # Examples
/// ```
/// use hydro_gof::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn population_variance(data: &[f64]) -> Result<f64> {
    ensure_sample(data, "input")?;
    let acc = WelfordAccumulator::from_slice(data);
    Ok(acc.population_variance())
}

/// Computes the population standard deviation.
///
/// The KGE variability ratio is defined on this convention, so it is not
/// interchangeable with the sample (`n − 1`) standard deviation.
///
/// # Errors
/// - [`GofError::EmptyInput`] if `data` is empty.
/// - [`GofError::NonFiniteInput`] if `data` contains NaN/Inf.
///
/// # Examples
/// ```
/// use hydro_gof::stats::population_std_dev;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-10);
/// assert_eq!(population_std_dev(&[5.0; 8]).unwrap(), 0.0);
/// ```
pub fn population_std_dev(data: &[f64]) -> Result<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Computes Pearson's product-moment correlation coefficient.
///
/// # Formula
/// ```text
/// r = Σ(xᵢ − x̄)(yᵢ − ȳ) / √(Σ(xᵢ − x̄)² · Σ(yᵢ − ȳ)²)
/// ```
///
/// Centered sums use Welford means, so a constant sequence has exactly
/// zero spread. Swapping the arguments performs the same floating-point
/// operations, so `r(x, y) == r(y, x)` holds bit for bit.
///
/// # Errors
/// - [`GofError::LengthMismatch`] if `x.len() != y.len()`.
/// - [`GofError::EmptyInput`] / [`GofError::NonFiniteInput`] for invalid samples.
/// - [`GofError::DegenerateInput`] if either sequence has zero variance.
///
/// # Examples
/// ```
/// use hydro_gof::stats::pearson_correlation;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [10.0, 8.0, 6.0, 4.0, 2.0];
/// assert!((pearson_correlation(&x, &y).unwrap() + 1.0).abs() < 1e-12);
/// ```
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    ensure_paired(x, y)?;
    ensure_sample(x, "first")?;
    ensure_sample(y, "second")?;

    let mean_x = WelfordAccumulator::from_slice(x).mean();
    let mean_y = WelfordAccumulator::from_slice(y).mean();

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(GofError::DegenerateInput {
            metric: "Pearson correlation",
            reason: "a sequence has zero variance",
        });
    }
    let den = (sxx * syy).sqrt();
    if den == 0.0 || !den.is_finite() {
        return Err(GofError::DegenerateInput {
            metric: "Pearson correlation",
            reason: "variance product is not representable",
        });
    }
    Ok(sxy / den)
}

/// Returns the lower-middle median: element `⌊n/2⌋` of the sorted data.
///
/// For even `n` this is the upper of the two central elements by index,
/// not their average. `data` is left untouched; a copy is sorted.
///
/// # Examples
/// ```
/// use hydro_gof::stats::lower_median;
/// assert_eq!(lower_median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
/// assert_eq!(lower_median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 3.0);
/// ```
pub fn lower_median(data: &[f64]) -> Result<f64> {
    ensure_sample(data, "input")?;
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Ok(sorted[sorted.len() / 2])
}

// ---------------------------------------------------------------------------
// Kahan compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// Improved Kahan variant that also handles an addend larger in magnitude
/// than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Single-pass accumulator for the mean and the sum of squared deviations.
///
/// # Examples
/// ```
/// use hydro_gof::stats::WelfordAccumulator;
/// let acc = WelfordAccumulator::from_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((acc.mean() - 5.0).abs() < 1e-15);
/// assert!((acc.sum_squared_deviations() - 32.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WelfordAccumulator {
    count: u64,
    mean_acc: f64,
    m2: f64,
}

impl WelfordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(data: &[f64]) -> Self {
        let mut acc = Self::new();
        for &x in data {
            acc.update(x);
        }
        acc
    }

    /// Feeds a new sample into the accumulator.
    ///
    /// The first sample only initializes the mean, which avoids an
    /// intermediate `delta²` overflow for very large values.
    pub fn update(&mut self, value: f64) {
        let n1 = self.count;
        self.count += 1;

        if n1 == 0 {
            self.mean_acc = value;
            return;
        }

        let delta = value - self.mean_acc;
        self.mean_acc += delta / self.count as f64;
        self.m2 += delta * (value - self.mean_acc);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running mean; `0.0` when empty.
    pub fn mean(&self) -> f64 {
        self.mean_acc
    }

    /// Σ(xᵢ − x̄)².
    pub fn sum_squared_deviations(&self) -> f64 {
        self.m2
    }

    /// Population variance (denominator `n`); `0.0` when empty.
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- mean ---

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_single() {
        assert_eq!(mean(&[42.0]).unwrap(), 42.0);
    }

    #[test]
    fn test_mean_empty() {
        assert!(matches!(mean(&[]), Err(GofError::EmptyInput { .. })));
    }

    #[test]
    fn test_mean_nan() {
        assert!(matches!(
            mean(&[1.0, f64::NAN, 3.0]),
            Err(GofError::NonFiniteInput { index: 1, .. })
        ));
    }

    #[test]
    fn test_mean_inf() {
        assert!(matches!(
            mean(&[1.0, 2.0, f64::INFINITY]),
            Err(GofError::NonFiniteInput { index: 2, .. })
        ));
    }

    // --- standard deviation ---

    #[test]
    fn test_population_std_dev_known() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = population_std_dev(&v).unwrap();
        assert!((sd - 2.0).abs() < 1e-12, "sd = {sd}");
    }

    #[test]
    fn test_population_std_dev_constant_is_exact_zero() {
        assert_eq!(population_std_dev(&[0.1; 7]).unwrap(), 0.0);
        assert_eq!(population_std_dev(&[5.0; 8]).unwrap(), 0.0);
    }

    #[test]
    fn test_population_std_dev_single() {
        assert_eq!(population_std_dev(&[3.5]).unwrap(), 0.0);
    }

    #[test]
    fn test_population_std_dev_empty() {
        assert!(matches!(
            population_std_dev(&[]),
            Err(GofError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_variance_large_offset() {
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        let var = population_variance(&data).unwrap();
        assert!(
            (var - 2.0).abs() < 1e-5,
            "population variance of offset data should be ~2.0, got {var}"
        );
    }

    // --- pearson ---

    #[test]
    fn test_pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!((r - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_pearson_uncorrelated() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, -1.0, -1.0, 1.0];
        let r = pearson_correlation(&x, &y).unwrap();
        assert!(r.abs() < 1e-14, "r = {r}");
    }

    #[test]
    fn test_pearson_constant_is_degenerate() {
        let x = [1.0, 2.0, 3.0];
        let y = [7.0, 7.0, 7.0];
        assert!(matches!(
            pearson_correlation(&x, &y),
            Err(GofError::DegenerateInput { .. })
        ));
        assert!(matches!(
            pearson_correlation(&y, &x),
            Err(GofError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert!(matches!(
            pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(GofError::LengthMismatch {
                observed: 2,
                simulated: 3
            })
        ));
    }

    // --- median ---

    #[test]
    fn test_lower_median_odd() {
        assert_eq!(lower_median(&[5.0, 1.0, 3.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_lower_median_even_picks_index_half() {
        // sorted [1, 2, 10, 20] -> index 2
        assert_eq!(lower_median(&[20.0, 1.0, 10.0, 2.0]).unwrap(), 10.0);
    }

    #[test]
    fn test_lower_median_numeric_not_lexicographic() {
        // lexicographic order would put "10" before "9"
        assert_eq!(lower_median(&[9.0, 10.0, 100.0]).unwrap(), 10.0);
    }

    #[test]
    fn test_lower_median_does_not_mutate() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = lower_median(&data).unwrap();
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    // --- kahan ---

    #[test]
    fn test_kahan_sum_compensates() {
        let data = [1.0, 1e100, 1.0, -1e100];
        assert_eq!(kahan_sum(&data), 2.0);
    }

    // --- welford ---

    #[test]
    fn test_welford_empty() {
        let acc = WelfordAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.population_variance(), 0.0);
    }

    #[test]
    fn test_welford_sum_squared_deviations() {
        let acc = WelfordAccumulator::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(acc.count(), 5);
        assert!((acc.sum_squared_deviations() - 10.0).abs() < 1e-12);
    }
}
