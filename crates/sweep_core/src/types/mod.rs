//! Core parameter-tree and error types.
//!
//! This module provides:
//! - `value`: The JSON-shaped `Value` union and the root `Config` mapping
//! - `error`: Structured error types for table construction and bisection
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Value`], [`Config`] from `value`
//! - [`TableError`], [`BisectError`] from `error`

pub mod error;
pub mod value;

// Re-export commonly used types at module level
pub use error::{BisectError, TableError};
pub use value::{Config, Value};
