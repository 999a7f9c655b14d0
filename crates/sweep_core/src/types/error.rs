//! Error types for structured error handling.
//!
//! This module provides:
//! - `TableError`: Errors from interpolation table construction
//! - `BisectError`: Errors from boolean threshold bisection

use thiserror::Error;

/// Interpolation table construction errors.
///
/// A table is only ever invalid at construction; lookups on a constructed
/// table cannot fail.
///
/// # Variants
/// - `LengthMismatch`: Input and output columns differ in length
/// - `InsufficientPoints`: Fewer than 2 data points
/// - `NotAscending`: Inputs are not strictly increasing
///
/// # Examples
/// ```
/// use sweep_core::types::TableError;
///
/// let err = TableError::InsufficientPoints { got: 1, need: 2 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient table points: got 1, need at least 2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Input and output columns differ in length.
    #[error("Table columns must have same length: got {xs} inputs and {ys} outputs")]
    LengthMismatch {
        /// Number of input points provided
        xs: usize,
        /// Number of output points provided
        ys: usize,
    },

    /// Fewer than the minimum number of data points.
    #[error("Insufficient table points: got {got}, need at least {need}")]
    InsufficientPoints {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Inputs are not strictly increasing.
    #[error("Table inputs are not strictly ascending at index {index}")]
    NotAscending {
        /// Index of the first input that fails to increase
        index: usize,
    },
}

/// Boolean bisection errors.
///
/// Generic over the predicate's own error type `E`, which is carried through
/// unchanged so callers can recover it without downcasting.
///
/// # Variants
/// - `NoCrossing`: The predicate agrees at both endpoints, so no threshold
///   can be bracketed
/// - `Predicate`: A predicate evaluation itself failed
///
/// # Examples
/// ```
/// use sweep_core::types::BisectError;
///
/// let err: BisectError<std::convert::Infallible> =
///     BisectError::NoCrossing { lower: 0.0, upper: 1.0 };
/// assert!(err.is_no_crossing());
/// assert!(format!("{}", err).contains("agrees at both endpoints"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BisectError<E> {
    /// The predicate agrees at both endpoints of the search range.
    #[error("No crossing in [{lower}, {upper}]: predicate agrees at both endpoints")]
    NoCrossing {
        /// Lower endpoint of the search range
        lower: f64,
        /// Upper endpoint of the search range
        upper: f64,
    },

    /// A predicate evaluation failed.
    #[error("Predicate evaluation failed: {0}")]
    Predicate(E),
}

impl<E> BisectError<E> {
    /// Check if the error is the recoverable no-crossing condition.
    pub fn is_no_crossing(&self) -> bool {
        matches!(self, BisectError::NoCrossing { .. })
    }

    /// Unwrap the carried predicate error, if any.
    pub fn into_predicate_error(self) -> Option<E> {
        match self {
            BisectError::Predicate(err) => Some(err),
            BisectError::NoCrossing { .. } => None,
        }
    }
}
