//! The boundary between the sweep and the excitable-cable model.
//!
//! The sweep never integrates membrane equations itself. It talks to a
//! [`CableSimulator`]: something that accepts a resolved parameter set and
//! answers whether a stimulus still propagates past a measurement point.
//! The production implementation wraps an external kinetics engine; the
//! in-repo [`SurrogateCable`](crate::surrogate::SurrogateCable) is a
//! closed-form stand-in for tests and demos.

use sweep_core::types::Config;
use thiserror::Error;

/// Errors reported by a cable simulator.
///
/// Reasons are carried as plain strings because concrete simulators wrap
/// arbitrary engines whose error types are not `Clone` or comparable.
///
/// # Variants
/// - `InvalidParameters`: A resolved parameter set was rejected before any
///   run started
/// - `RunFailed`: The simulation itself failed after parameters were
///   accepted
///
/// # Examples
/// ```
/// use sweep_driver::simulator::SimulatorError;
///
/// let err = SimulatorError::invalid_parameters("block_width_um is negative");
/// assert!(err.is_invalid_parameters());
/// assert!(format!("{}", err).contains("block_width_um"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// The simulator rejected a resolved parameter set.
    #[error("Simulator rejected parameters: {reason}")]
    InvalidParameters {
        /// What was wrong with the parameter set
        reason: String,
    },

    /// A simulation run failed after parameters were accepted.
    #[error("Simulation run failed: {reason}")]
    RunFailed {
        /// What went wrong during the run
        reason: String,
    },
}

impl SimulatorError {
    /// Create an `InvalidParameters` error.
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        SimulatorError::InvalidParameters {
            reason: reason.into(),
        }
    }

    /// Create a `RunFailed` error.
    pub fn run_failed(reason: impl Into<String>) -> Self {
        SimulatorError::RunFailed {
            reason: reason.into(),
        }
    }

    /// Check if the error is a parameter rejection.
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(self, SimulatorError::InvalidParameters { .. })
    }

    /// Check if the error is a failed run.
    pub fn is_run_failed(&self) -> bool {
        matches!(self, SimulatorError::RunFailed { .. })
    }
}

/// A discretized fiber model the sweep can drive.
///
/// One instance models one fiber. The sweep constructs an instance per
/// outer step and reuses it across every bisection probe of that step:
/// each probe re-applies the freshly resolved parameters, then runs the
/// model once. Calls on one instance are strictly serialized; only one
/// run may be in flight at a time.
///
/// # Design Philosophy
///
/// The two methods split "load state" from "observe behaviour" so that a
/// wrapped engine can rebuild only what a parameter change invalidates.
/// `apply_parameters` must be idempotent: applying the same resolved set
/// twice leaves the model in the same state, which is what makes repeated
/// bisection probes on one instance sound.
///
/// # Examples
///
/// ```
/// use sweep_core::types::Config;
/// use sweep_driver::simulator::{CableSimulator, SimulatorError};
///
/// struct AlwaysConducts;
///
/// impl CableSimulator for AlwaysConducts {
///     fn apply_parameters(&mut self, _parameters: &Config) -> Result<(), SimulatorError> {
///         Ok(())
///     }
///
///     fn run_and_check_propagation(
///         &mut self,
///         _measurement_fraction: f64,
///         _threshold_voltage: f64,
///     ) -> Result<bool, SimulatorError> {
///         Ok(true)
///     }
/// }
///
/// let mut cable = AlwaysConducts;
/// cable.apply_parameters(&Config::new()).unwrap();
/// assert!(cable.run_and_check_propagation(0.99, -45.0).unwrap());
/// ```
pub trait CableSimulator {
    /// Load a fully resolved parameter set into the model.
    ///
    /// Re-application is idempotent; unknown keys are ignored so one
    /// resolved config can feed both the simulator and the output record.
    fn apply_parameters(&mut self, parameters: &Config) -> Result<(), SimulatorError>;

    /// Run a stimulus down the fiber and report whether it propagates.
    ///
    /// Returns `true` when the membrane response at `measurement_fraction`
    /// of the fiber length reaches `threshold_voltage`.
    fn run_and_check_propagation(
        &mut self,
        measurement_fraction: f64,
        threshold_voltage: f64,
    ) -> Result<bool, SimulatorError>;
}
