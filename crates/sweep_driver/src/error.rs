use crate::simulator::SimulatorError;
use sweep_resolve::ResolveError;
use thiserror::Error;

/// Errors that abort a threshold sweep.
///
/// A sweep stops at the first error; rows already handed to the record
/// sink stay wherever the sink put them. Exhausting the search range
/// without a crossing is not an error at this level, it becomes a NaN
/// threshold in the affected row.
///
/// # Variants
///
/// * `InvalidStepCount` - The plan asked for fewer than 2 outer steps
/// * `Resolve` - Rewriting a bound config failed
/// * `Simulator` - Building or running the cable simulator failed
/// * `Output` - Writing a record to the sink failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The outer grid spacing `i / (N - 1)` needs at least two points.
    #[error("Sweep requires at least 2 outer steps, got {steps}")]
    InvalidStepCount {
        /// The rejected step count
        steps: usize,
    },

    /// A bound config did not rewrite to plain values.
    #[error("Configuration resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The simulator rejected parameters or a run failed.
    #[error("Cable simulator failed: {0}")]
    Simulator(#[from] SimulatorError),

    /// A record could not be written.
    #[error("Record output failed: {reason}")]
    Output {
        /// What the sink reported
        reason: String,
    },
}

impl SweepError {
    /// Creates a [`SweepError::InvalidStepCount`] error.
    pub fn invalid_step_count(steps: usize) -> Self {
        Self::InvalidStepCount { steps }
    }

    /// Creates a [`SweepError::Output`] error.
    pub fn output(reason: impl Into<String>) -> Self {
        Self::Output {
            reason: reason.into(),
        }
    }

    /// Returns true if this is an invalid step count error.
    pub fn is_invalid_step_count(&self) -> bool {
        matches!(self, Self::InvalidStepCount { .. })
    }

    /// Returns true if this error came from config resolution.
    pub fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve(_))
    }

    /// Returns true if this error came from the simulator.
    pub fn is_simulator(&self) -> bool {
        matches!(self, Self::Simulator(_))
    }

    /// Returns true if this error came from the record sink.
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output { .. })
    }
}
