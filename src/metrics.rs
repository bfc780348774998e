//! Goodness-of-fit metrics comparing an observed series with a simulated one.
//!
//! All functions take `(observed, simulated)` in that order, require equal
//! lengths, and never modify their inputs.
//!
//! | Metric | Range | Perfect fit |
//! |--------|-------|-------------|
//! | [`nse`] | (−∞, 1] | 1 |
//! | [`kge`] | (−∞, 1] | 1 |
//! | [`pbias`] | (−∞, ∞) % | 0 |
//! | [`npe`] | (−∞, 100] | 100 |

use std::fmt;

use serde::Serialize;

use crate::error::{GofError, Result};
use crate::render::shortest;
use crate::stats::{
    ensure_paired, ensure_sample, kahan_sum, lower_median, mean, pearson_correlation,
    population_std_dev, WelfordAccumulator,
};

fn ensure_pair(observed: &[f64], simulated: &[f64]) -> Result<()> {
    ensure_paired(observed, simulated)?;
    ensure_sample(observed, "observed")?;
    ensure_sample(simulated, "simulated")
}

/// Nash-Sutcliffe Efficiency.
///
/// # Formula
/// ```text
/// NSE = 1 − Σ(obsᵢ − simᵢ)² / Σ(obsᵢ − mean(obs))²
/// ```
///
/// # Errors
/// [`GofError::DegenerateInput`] if `observed` has zero variance or a
/// sum of squares is not representable.
///
/// # Examples
/// ```
/// use hydro_gof::metrics::nse;
/// let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(nse(&obs, &obs).unwrap(), 1.0);
/// ```
pub fn nse(observed: &[f64], simulated: &[f64]) -> Result<f64> {
    ensure_pair(observed, simulated)?;

    let numerator: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s) * (o - s))
        .sum();
    let denominator = WelfordAccumulator::from_slice(observed).sum_squared_deviations();
    if denominator == 0.0 {
        return Err(GofError::DegenerateInput {
            metric: "NSE",
            reason: "observed sequence has zero variance",
        });
    }
    if !numerator.is_finite() || !denominator.is_finite() {
        return Err(GofError::DegenerateInput {
            metric: "NSE",
            reason: "sum of squares overflows",
        });
    }
    Ok(1.0 - numerator / denominator)
}

/// Percent Bias: the average tendency of `simulated` to over- (positive)
/// or under- (negative) estimate `observed`.
///
/// # Formula
/// ```text
/// PBIAS = 100 × Σ(simᵢ − obsᵢ) / Σ obsᵢ
/// ```
///
/// # Errors
/// [`GofError::DegenerateInput`] if `Σ obsᵢ == 0` or either sum is not
/// representable.
///
/// # Examples
/// ```
/// use hydro_gof::metrics::pbias;
/// let obs = [10.0, 20.0, 30.0];
/// let sim = [11.0, 22.0, 33.0];
/// assert!((pbias(&obs, &sim).unwrap() - 10.0).abs() < 1e-12);
/// ```
pub fn pbias(observed: &[f64], simulated: &[f64]) -> Result<f64> {
    ensure_pair(observed, simulated)?;

    let diffs: Vec<f64> = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| s - o)
        .collect();
    let total = kahan_sum(observed);
    if total == 0.0 {
        return Err(GofError::DegenerateInput {
            metric: "PBIAS",
            reason: "observed values sum to zero",
        });
    }
    let bias = kahan_sum(&diffs);
    if !total.is_finite() || !bias.is_finite() {
        return Err(GofError::DegenerateInput {
            metric: "PBIAS",
            reason: "sum overflows",
        });
    }
    Ok(100.0 * (bias / total))
}

/// The three terms of the Kling-Gupta decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KgeComponents {
    /// Pearson correlation between observed and simulated.
    pub r: f64,
    /// Variability ratio `sd(sim) / sd(obs)` (population convention).
    pub alpha: f64,
    /// Bias ratio `mean(sim) / mean(obs)`.
    pub beta: f64,
}

impl KgeComponents {
    /// `1 − √((r−1)² + (α−1)² + (β−1)²)`
    pub fn efficiency(&self) -> f64 {
        let dr = self.r - 1.0;
        let da = self.alpha - 1.0;
        let db = self.beta - 1.0;
        1.0 - (dr * dr + da * da + db * db).sqrt()
    }
}

/// Computes the correlation, variability and bias terms of KGE.
///
/// # Errors
/// - [`GofError::DegenerateInput`] if either sequence has zero variance
///   (correlation undefined) or `mean(obs) == 0` (bias ratio undefined).
pub fn kge_components(observed: &[f64], simulated: &[f64]) -> Result<KgeComponents> {
    ensure_pair(observed, simulated)?;

    let r = pearson_correlation(observed, simulated)?;

    let sd_obs = population_std_dev(observed)?;
    if sd_obs == 0.0 {
        return Err(GofError::DegenerateInput {
            metric: "KGE",
            reason: "observed sequence has zero standard deviation",
        });
    }
    let alpha = population_std_dev(simulated)? / sd_obs;

    let mean_obs = mean(observed)?;
    if mean_obs == 0.0 {
        return Err(GofError::DegenerateInput {
            metric: "KGE",
            reason: "observed mean is zero",
        });
    }
    let beta = mean(simulated)? / mean_obs;

    if ![sd_obs, alpha, mean_obs, beta].iter().all(|v| v.is_finite()) {
        return Err(GofError::DegenerateInput {
            metric: "KGE",
            reason: "variability or bias ratio overflows",
        });
    }
    Ok(KgeComponents { r, alpha, beta })
}

/// Kling-Gupta Efficiency.
///
/// # Errors
/// Same as [`kge_components`].
///
/// # Examples
/// ```
/// use hydro_gof::metrics::kge;
/// let obs = [1.0, 3.0, 2.0, 5.0, 4.0];
/// assert_eq!(kge(&obs, &obs).unwrap(), 1.0);
///
/// // constant simulation: correlation is undefined
/// assert!(kge(&obs, &[3.0; 5]).is_err());
/// ```
pub fn kge(observed: &[f64], simulated: &[f64]) -> Result<f64> {
    kge_components(observed, simulated).map(|c| c.efficiency())
}

/// NSE expressed as a percentage: exactly `nse(observed, simulated) × 100`.
///
/// This is not the textbook "normalized peak error"; it keeps the
/// established report semantics of an NSE scaled by 100.
pub fn npe(observed: &[f64], simulated: &[f64]) -> Result<f64> {
    nse(observed, simulated).map(|v| v * 100.0)
}

/// Medians of the observed and simulated series, reported in place of a
/// rank-sum statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MedianComparison {
    pub observed: f64,
    pub simulated: f64,
}

impl MedianComparison {
    /// `simulated − observed`.
    pub fn difference(&self) -> f64 {
        self.simulated - self.observed
    }
}

impl fmt::Display for MedianComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Median observed = {}, Median simulated = {}",
            shortest(self.observed),
            shortest(self.simulated)
        )
    }
}

/// Compares the lower-middle medians (index `⌊n/2⌋` after sorting) of both
/// series.
///
/// This approximates a Wilcoxon rank-sum comparison and is labelled that
/// way in reports; no rank statistic or p-value is computed. Both inputs
/// are sorted as copies.
///
/// # Examples
/// ```
/// use hydro_gof::metrics::median_comparison;
/// let m = median_comparison(&[3.0, 1.0, 2.0], &[6.0, 4.0, 5.5]).unwrap();
/// assert_eq!(m.to_string(), "Median observed = 2, Median simulated = 5.5");
/// ```
pub fn median_comparison(observed: &[f64], simulated: &[f64]) -> Result<MedianComparison> {
    ensure_sample(observed, "observed")?;
    ensure_sample(simulated, "simulated")?;
    Ok(MedianComparison {
        observed: lower_median(observed)?,
        simulated: lower_median(simulated)?,
    })
}
