//! Pairing, validation and report assembly.
//!
//! [`compare`] is the single entry point most callers need: it checks that
//! the two series line up, runs every metric in a fixed order, and returns
//! a [`MetricReport`] of formatted values. Any failure aborts the whole
//! comparison.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{GofError, Result};
use crate::metrics::{self, KgeComponents, MedianComparison};
use crate::render::fixed;

/// Observed and simulated series paired by index.
///
/// Construction guarantees equal lengths; index `i` in both series refers
/// to the same time step.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPair {
    observed: Vec<f64>,
    simulated: Vec<f64>,
}

impl SeriesPair {
    /// # Errors
    /// [`GofError::LengthMismatch`] if the lengths differ.
    pub fn new(observed: Vec<f64>, simulated: Vec<f64>) -> Result<Self> {
        if observed.len() != simulated.len() {
            return Err(GofError::LengthMismatch {
                observed: observed.len(),
                simulated: simulated.len(),
            });
        }
        Ok(Self {
            observed,
            simulated,
        })
    }

    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    pub fn simulated(&self) -> &[f64] {
        &self.simulated
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn evaluate(&self) -> Result<GoodnessOfFit> {
        evaluate(&self.observed, &self.simulated)
    }

    pub fn compare(&self) -> Result<MetricReport> {
        self.evaluate().map(|fit| fit.report())
    }
}

/// Unformatted metric values for one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFit {
    pub nse: f64,
    pub kge: f64,
    pub kge_components: KgeComponents,
    pub pbias: f64,
    pub npe: f64,
    pub medians: MedianComparison,
}

impl GoodnessOfFit {
    /// Formats every metric at its report precision.
    pub fn report(&self) -> MetricReport {
        MetricReport {
            nse: fixed(self.nse, 3),
            kge: fixed(self.kge, 3),
            pbias: percent(self.pbias),
            npe: percent(self.npe),
            wilcoxon: self.medians.to_string(),
        }
    }
}

/// Formatted comparison result, keyed by metric name in a fixed order.
///
/// Serializes as a JSON object whose keys appear as
/// `NSE, KGE, PBIAS, NPE, Wilcoxon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricReport {
    #[serde(rename = "NSE")]
    nse: String,
    #[serde(rename = "KGE")]
    kge: String,
    #[serde(rename = "PBIAS")]
    pbias: String,
    #[serde(rename = "NPE")]
    npe: String,
    #[serde(rename = "Wilcoxon")]
    wilcoxon: String,
}

impl MetricReport {
    pub const KEYS: [&'static str; 5] = ["NSE", "KGE", "PBIAS", "NPE", "Wilcoxon"];

    /// `(name, value)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("NSE", self.nse.as_str()),
            ("KGE", self.kge.as_str()),
            ("PBIAS", self.pbias.as_str()),
            ("NPE", self.npe.as_str()),
            ("Wilcoxon", self.wilcoxon.as_str()),
        ]
    }

    /// Looks up a value by metric name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries() {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// Computes every metric for an observed/simulated pair.
///
/// The length check runs before any statistic. Metrics are evaluated in
/// report order (NSE, KGE, PBIAS, NPE, medians) and the first failure is
/// returned.
pub fn evaluate(observed: &[f64], simulated: &[f64]) -> Result<GoodnessOfFit> {
    if observed.len() != simulated.len() {
        return Err(GofError::LengthMismatch {
            observed: observed.len(),
            simulated: simulated.len(),
        });
    }

    let nse = metrics::nse(observed, simulated)?;
    let kge_components = metrics::kge_components(observed, simulated)?;
    let kge = kge_components.efficiency();
    let pbias = metrics::pbias(observed, simulated)?;
    let npe = metrics::npe(observed, simulated)?;
    let medians = metrics::median_comparison(observed, simulated)?;

    debug!(n = observed.len(), nse, kge, pbias, npe, "computed goodness of fit");

    Ok(GoodnessOfFit {
        nse,
        kge,
        kge_components,
        pbias,
        npe,
        medians,
    })
}

/// Runs [`evaluate`] and formats the result.
///
/// # Examples
/// ```
/// use hydro_gof::compare;
/// let obs = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let report = compare(&obs, &obs).unwrap();
/// assert_eq!(report.get("NSE"), Some("1.000"));
/// assert_eq!(report.get("PBIAS"), Some("0.00%"));
/// assert_eq!(report.get("NPE"), Some("100.00%"));
/// ```
pub fn compare(observed: &[f64], simulated: &[f64]) -> Result<MetricReport> {
    evaluate(observed, simulated).map(|fit| fit.report())
}

fn percent(value: f64) -> String {
    format!("{}%", fixed(value, 2))
}
