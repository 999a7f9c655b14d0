//! Sweep configuration.

use crate::error::SweepError;

/// Everything a threshold sweep needs to know besides the config itself.
///
/// Names the two plumbing keys (the outer swept variable and the inner
/// threshold variable, both normalized to `[0, 1]`), sizes the outer grid
/// and the bisection search, and carries the two observation settings
/// handed to the simulator on every probe.
///
/// # Example
///
/// ```
/// use sweep_driver::plan::SweepPlan;
///
/// let plan = SweepPlan::new("sweep_position", "block_strength")
///     .with_outer_steps(11)
///     .with_bisect_iterations(24);
///
/// assert_eq!(plan.outer_steps, 11);
/// assert_eq!(plan.position(5), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    /// Key bound to the normalized outer position `i / (N - 1)`.
    pub swept_key: String,

    /// Key bound to the bisection candidate during the threshold search.
    pub threshold_key: String,

    /// Number of outer grid points. A sweep needs at least 2.
    pub outer_steps: usize,

    /// Halving rounds per threshold search.
    ///
    /// The final bracket width is `1 / 2^bisect_iterations`.
    pub bisect_iterations: usize,

    /// Fraction of the fiber length at which propagation is judged.
    pub measurement_fraction: f64,

    /// Membrane voltage the response must reach to count as propagated,
    /// in mV.
    pub threshold_voltage: f64,
}

impl Default for SweepPlan {
    /// Create a default plan with sensible values.
    ///
    /// Default values:
    /// - `swept_key`: `"sweep_position"`
    /// - `threshold_key`: `"block_strength"`
    /// - `outer_steps`: 21
    /// - `bisect_iterations`: 20
    /// - `measurement_fraction`: 0.99
    /// - `threshold_voltage`: -45.0
    fn default() -> Self {
        Self {
            swept_key: "sweep_position".to_string(),
            threshold_key: "block_strength".to_string(),
            outer_steps: 21,
            bisect_iterations: 20,
            measurement_fraction: 0.99,
            threshold_voltage: -45.0,
        }
    }
}

impl SweepPlan {
    /// Create a plan over the given plumbing keys, other fields defaulted.
    ///
    /// # Panics
    ///
    /// Panics if either key is empty or the two keys are equal.
    pub fn new(swept_key: impl Into<String>, threshold_key: impl Into<String>) -> Self {
        let swept_key = swept_key.into();
        let threshold_key = threshold_key.into();
        assert!(!swept_key.is_empty(), "swept key must not be empty");
        assert!(!threshold_key.is_empty(), "threshold key must not be empty");
        assert!(
            swept_key != threshold_key,
            "swept and threshold keys must differ"
        );
        Self {
            swept_key,
            threshold_key,
            ..Self::default()
        }
    }

    /// Create a plan for coarse preview sweeps.
    ///
    /// Uses a 5-point outer grid and 10 halving rounds, enough to see the
    /// shape of a threshold curve quickly.
    pub fn fast() -> Self {
        Self {
            outer_steps: 5,
            bisect_iterations: 10,
            ..Self::default()
        }
    }

    /// Create a plan with high precision settings.
    ///
    /// Uses a 41-point outer grid and 30 halving rounds (bracket width
    /// below 1e-9) for publication-grade threshold curves.
    pub fn high_precision() -> Self {
        Self {
            outer_steps: 41,
            bisect_iterations: 30,
            ..Self::default()
        }
    }

    /// Sets the number of outer grid points.
    ///
    /// Counts below 2 are caught by [`validate`](Self::validate), not here.
    pub fn with_outer_steps(mut self, outer_steps: usize) -> Self {
        self.outer_steps = outer_steps;
        self
    }

    /// Sets the number of halving rounds, at least 1.
    pub fn with_bisect_iterations(mut self, iterations: usize) -> Self {
        self.bisect_iterations = iterations.max(1);
        self
    }

    /// Sets the measurement position, clamped to `[0, 1]`.
    pub fn with_measurement_fraction(mut self, fraction: f64) -> Self {
        self.measurement_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the propagation voltage criterion, in mV.
    pub fn with_threshold_voltage(mut self, voltage: f64) -> Self {
        self.threshold_voltage = voltage;
        self
    }

    /// Check the plan before a sweep starts.
    ///
    /// A single outer point would make the grid spacing `i / (N - 1)`
    /// divide by zero, so counts below 2 are rejected.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.outer_steps < 2 {
            return Err(SweepError::invalid_step_count(self.outer_steps));
        }
        Ok(())
    }

    /// Normalized position of an outer step, `step / (N - 1)`.
    ///
    /// The first step sits at 0, the last at exactly 1. Meaningful only
    /// for a validated plan.
    pub fn position(&self, step: usize) -> f64 {
        debug_assert!(self.outer_steps >= 2, "position needs a validated plan");
        step as f64 / (self.outer_steps - 1) as f64
    }
}
