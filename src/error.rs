//! Error type shared by every fallible operation in the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from goodness-of-fit computations and input loading.
///
/// Every variant is terminal for the comparison that produced it: callers
/// get either a complete result or one of these, never a partial record.
#[derive(Debug, Error)]
pub enum GofError {
    #[error("{what} sequence is empty")]
    EmptyInput { what: &'static str },

    #[error("{metric} is undefined: {reason}")]
    DegenerateInput {
        metric: &'static str,
        reason: &'static str,
    },

    #[error("sequences differ in length: observed has {observed} values, simulated has {simulated}")]
    LengthMismatch { observed: usize, simulated: usize },

    #[error("non-finite value {value} at index {index}")]
    NonFiniteInput { index: usize, value: f64 },

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for goodness-of-fit operations.
pub type Result<T> = std::result::Result<T, GofError>;
