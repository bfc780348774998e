//! # hydro-gof
//!
//! Goodness-of-fit statistics for comparing an observed time series with
//! a simulated (or measured) one.
//!
//! ## Modules
//!
//! - [`stats`] — mean, population standard deviation, Pearson correlation, median
//! - [`metrics`] — NSE, KGE, PBIAS, NPE and the median comparison
//! - [`parse`] — line-delimited text to numeric sequence
//! - [`comparison`] — paired validation and the formatted [`MetricReport`]
//! - [`load`] — reading both series from disk
//! - [`render`] — fixed-point and shortest number formatting for reports
//!
//! ## Design Philosophy
//!
//! - **Explicit failure**: empty input, zero variance and zero sums are
//!   reported as [`GofError`] instead of surfacing as NaN or infinity
//! - **Inputs are borrowed, never mutated**: medians sort a copy
//! - **Property-based testing**: metric identities verified via proptest
//!
//! ```
//! use hydro_gof::{compare, parse::parse_sequence};
//!
//! let observed = parse_sequence("q_obs\n1\n2\n3\n4\n5\n");
//! let simulated = parse_sequence("1.1\n1.9\n3.2\n3.9\n5.1\n");
//! let report = compare(&observed, &simulated)?;
//! println!("{report}");
//! # Ok::<(), hydro_gof::GofError>(())
//! ```

pub mod comparison;
pub mod error;
pub mod load;
pub mod metrics;
pub mod parse;
pub mod render;
pub mod stats;

pub use comparison::{compare, evaluate, GoodnessOfFit, MetricReport, SeriesPair};
pub use error::{GofError, Result};
