//! # sweep_driver
//!
//! Conduction-block threshold sweeps for Cablesweep.
//!
//! This crate walks a swept variable across the unit interval and, at
//! each position, bisects for the weakest block strength that stops
//! propagation along an excitable cable. Rows stream to a CSV sink as
//! they finish, with a NaN threshold marking positions where the search
//! range never crossed.
//!
//! ## Architecture Position
//!
//! Top library layer, between config resolution (`sweep_resolve`) and
//! the command-line surface (`service_cli`). The actual cable lives
//! behind the [`CableSimulator`] trait; [`SurrogateCable`] is the
//! built-in closed-form implementation.
//!
//! ## Modules
//!
//! - `plan`: The [`SweepPlan`] settings bundle
//! - `runner`: The [`SweepRunner`] outer loop and threshold search
//! - `simulator`: The [`CableSimulator`] seam and its errors
//! - `surrogate`: A closed-form cable for tests and demos
//! - `columns`: The scan deciding which config keys become columns
//! - `record`: Flat output rows and the streaming CSV writer
//!
//! ## Example
//!
//! ```rust
//! use sweep_driver::{SurrogateCable, SweepPlan, SweepRunner};
//! use sweep_resolve::parse_config;
//!
//! let template = parse_config(
//!     r#"{
//!         "sweep_position": 0.0,
//!         "block_strength": 0.0,
//!         "block_width_um": {"action": "interpolate", "example_inputs": [0, 1],
//!                            "example_outputs": [80, 200], "new_input": "sweep_position"}
//!     }"#,
//! )
//! .unwrap();
//!
//! let runner = SweepRunner::new(
//!     SweepPlan::new("sweep_position", "block_strength").with_outer_steps(3),
//! );
//! let summary = runner
//!     .run(&template, |config| SurrogateCable::from_config(config), |_| Ok(()))
//!     .unwrap();
//!
//! assert_eq!(summary.columns.last().map(String::as_str), Some("block_strength"));
//! assert!(summary.records.iter().all(|row| row.threshold > 0.0));
//! ```

#![warn(missing_docs)]

pub mod columns;
pub mod plan;
pub mod record;
pub mod runner;
pub mod simulator;
pub mod surrogate;

mod error;

pub use columns::swept_columns;
pub use error::SweepError;
pub use plan::SweepPlan;
pub use record::{RecordWriter, SweepRecord};
pub use runner::{SweepRunner, SweepSummary};
pub use simulator::{CableSimulator, SimulatorError};
pub use surrogate::SurrogateCable;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::SweepError;
    pub use crate::plan::SweepPlan;
    pub use crate::record::{RecordWriter, SweepRecord};
    pub use crate::runner::{SweepRunner, SweepSummary};
    pub use crate::simulator::{CableSimulator, SimulatorError};
    pub use crate::surrogate::SurrogateCable;
}
