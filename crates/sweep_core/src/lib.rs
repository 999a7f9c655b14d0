//! # sweep_core: Parameter Model and Threshold-Search Math
//!
//! ## Foundation Layer Role
//!
//! sweep_core is the bottom layer of the workspace, providing:
//! - The JSON-shaped parameter tree (`types::value`)
//! - Piecewise-linear interpolation tables (`math::interpolate`)
//! - Boolean threshold bisection (`math::bisect`)
//! - The Gaussian spatial profile (`math::profile`)
//! - Error types: `TableError`, `BisectError` (`types::error`)
//!
//! ## Minimal Dependency Principle
//!
//! This layer has no dependencies on other sweep_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - serde: Untagged (de)serialisation of the parameter tree
//! - thiserror: Structured error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use sweep_core::math::bisect::bisect;
//! use sweep_core::math::interpolate::LinearTable;
//!
//! // Map a normalised coordinate onto a physical range
//! let table = LinearTable::new(vec![0.0_f64, 1.0], vec![2.0, 82.0]).unwrap();
//! assert!((table.value_at(0.5) - 42.0).abs() < 1e-12);
//!
//! // Narrow a boolean crossing to 1/2^20 of the range
//! let predicate = |x: f64| Ok::<bool, std::convert::Infallible>(x >= 7.0);
//! let bracket = bisect(predicate, 0.0, 10.0, 20).unwrap();
//! assert!(bracket.lo < 7.0 && 7.0 <= bracket.hi);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
