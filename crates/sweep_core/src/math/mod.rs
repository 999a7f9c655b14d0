//! Numerical building blocks for threshold sweeps.
//!
//! This module provides the pure math the resolver and driver layers build
//! on, with full `f32`/`f64` support through generic `T: Float` type
//! parameters:
//!
//! - [`interpolate::LinearTable`]: Piecewise-linear lookup with clamped
//!   extrapolation
//! - [`bisect::bisect`]: Boolean threshold bisection over a fallible
//!   predicate
//! - [`profile::gaussian_profile`]: Gaussian spatial profile evaluation
//!
//! Everything here is side-effect free; file I/O lives in `sweep_resolve`.

pub mod bisect;
pub mod interpolate;
pub mod profile;

// Re-export the workhorse types at module level
pub use bisect::{bisect, Bracket};
pub use interpolate::LinearTable;
pub use profile::gaussian_profile;
