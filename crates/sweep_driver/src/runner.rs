//! The outer sweep loop.
//!
//! A sweep walks the unit interval in equal steps, binds each position
//! into the config template, and runs a bisection search for the weakest
//! block strength that stops propagation at that position. Each finished
//! row goes to a caller-supplied sink before the next row starts.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use sweep_core::math::bisect::bisect;
use sweep_core::types::{BisectError, Config, Value};
use sweep_resolve::Resolver;

use crate::columns::swept_columns;
use crate::error::SweepError;
use crate::plan::SweepPlan;
use crate::record::SweepRecord;
use crate::simulator::{CableSimulator, SimulatorError};

/// What a finished sweep produced.
#[derive(Debug, Clone)]
pub struct SweepSummary {
    /// Output column names, swept keys sorted then the threshold key last
    pub columns: Vec<String>,

    /// One record per outer step, in step order
    pub records: Vec<SweepRecord>,

    /// Rows whose threshold search found no crossing
    pub no_crossing_rows: usize,

    /// Whether the rows were computed on a thread pool
    pub used_parallel: bool,
}

impl SweepSummary {
    /// Rows that bracketed a genuine threshold.
    pub fn crossing_rows(&self) -> usize {
        self.records.len() - self.no_crossing_rows
    }
}

/// Runs threshold sweeps described by a [`SweepPlan`].
///
/// The runner owns the plan and a [`Resolver`]; the config template, the
/// simulator factory, and the record sink arrive per call, so one runner
/// serves many templates.
///
/// Per outer step the runner builds one simulator from the resolved
/// step config and reuses it across every bisection probe, re-applying
/// parameters before each run. The probe asks whether the candidate
/// strength blocks propagation, so the search brackets the weakest
/// blocking strength.
///
/// # Example
///
/// ```
/// use sweep_driver::plan::SweepPlan;
/// use sweep_driver::runner::SweepRunner;
/// use sweep_driver::surrogate::SurrogateCable;
/// use sweep_resolve::parse_config;
///
/// let template = parse_config(
///     r#"{
///         "sweep_position": 0.0,
///         "block_strength": 0.0,
///         "block_width_um": {"action": "interpolate", "example_inputs": [0, 1],
///                            "example_outputs": [100, 200], "new_input": "sweep_position"}
///     }"#,
/// )
/// .unwrap();
///
/// let runner = SweepRunner::new(SweepPlan::fast());
/// let summary = runner
///     .run(&template, |config| SurrogateCable::from_config(config), |_| Ok(()))
///     .unwrap();
///
/// assert_eq!(summary.records.len(), 5);
/// assert_eq!(summary.no_crossing_rows, 0);
/// ```
#[derive(Debug, Clone)]
pub struct SweepRunner {
    plan: SweepPlan,
    resolver: Resolver,
}

impl SweepRunner {
    /// Creates a runner with the given plan and a default resolver.
    pub fn new(plan: SweepPlan) -> Self {
        Self {
            plan,
            resolver: Resolver::new(),
        }
    }

    /// Creates a runner with the default plan.
    pub fn with_defaults() -> Self {
        Self::new(SweepPlan::default())
    }

    /// Replaces the resolver, keeping the plan.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Returns the plan this runner executes.
    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    /// Returns the resolver used for every config rewrite.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Column names of the records a sweep over `template` emits.
    ///
    /// The swept columns in sorted order, then the threshold key last.
    pub fn output_columns(&self, template: &Config) -> Vec<String> {
        let mut columns = swept_columns(template, &self.plan.swept_key, &self.plan.threshold_key);
        columns.push(self.plan.threshold_key.clone());
        columns
    }

    /// Runs the sweep, handing each finished record to `on_record`.
    ///
    /// `build_simulator` is called once per outer step with the resolved
    /// step config. `on_record` sees rows in step order, each before the
    /// next step starts, so partial output survives a later failure.
    ///
    /// A search range with no crossing records a NaN threshold and the
    /// sweep continues; every other failure aborts with the offending
    /// error.
    pub fn run<S, B, F>(
        &self,
        template: &Config,
        build_simulator: B,
        mut on_record: F,
    ) -> Result<SweepSummary, SweepError>
    where
        S: CableSimulator,
        B: Fn(&Config) -> Result<S, SimulatorError>,
        F: FnMut(&SweepRecord) -> Result<(), SweepError>,
    {
        self.plan.validate()?;
        let columns = self.output_columns(template);
        let swept = &columns[..columns.len() - 1];
        tracing::info!(
            steps = self.plan.outer_steps,
            swept_key = %self.plan.swept_key,
            threshold_key = %self.plan.threshold_key,
            columns = columns.len(),
            "starting threshold sweep"
        );

        let mut records = Vec::with_capacity(self.plan.outer_steps);
        let mut no_crossing_rows = 0;
        for step in 0..self.plan.outer_steps {
            let record = self.run_step(template, swept, step, &build_simulator)?;
            if record.is_no_crossing() {
                no_crossing_rows += 1;
            }
            on_record(&record)?;
            records.push(record);
        }

        tracing::info!(rows = records.len(), no_crossing_rows, "sweep complete");
        Ok(SweepSummary {
            columns,
            records,
            no_crossing_rows,
            used_parallel: false,
        })
    }

    /// Runs the sweep with outer steps spread across the rayon pool.
    ///
    /// Steps are independent, so the records come back identical to a
    /// sequential run and in the same order. There is no streaming sink;
    /// rows are collected and returned together.
    #[cfg(feature = "parallel")]
    pub fn run_parallel<S, B>(
        &self,
        template: &Config,
        build_simulator: B,
    ) -> Result<SweepSummary, SweepError>
    where
        S: CableSimulator,
        B: Fn(&Config) -> Result<S, SimulatorError> + Sync,
    {
        self.plan.validate()?;
        let columns = self.output_columns(template);
        let swept = &columns[..columns.len() - 1];
        tracing::info!(
            steps = self.plan.outer_steps,
            "starting parallel threshold sweep"
        );

        let records = (0..self.plan.outer_steps)
            .into_par_iter()
            .map(|step| self.run_step(template, swept, step, &build_simulator))
            .collect::<Result<Vec<_>, SweepError>>()?;

        let no_crossing_rows = records
            .iter()
            .filter(|record| record.is_no_crossing())
            .count();
        tracing::info!(rows = records.len(), no_crossing_rows, "parallel sweep complete");
        Ok(SweepSummary {
            columns,
            records,
            no_crossing_rows,
            used_parallel: true,
        })
    }

    /// One outer step: resolve, build the simulator, search, record.
    fn run_step<S, B>(
        &self,
        template: &Config,
        swept: &[String],
        step: usize,
        build_simulator: &B,
    ) -> Result<SweepRecord, SweepError>
    where
        S: CableSimulator,
        B: Fn(&Config) -> Result<S, SimulatorError>,
    {
        let position = self.plan.position(step);
        let stepped = bind_number(template, &self.plan.swept_key, position);
        let resolved_step = self.resolver.simplify(&stepped)?;
        let mut simulator = build_simulator(&resolved_step)?;
        tracing::info!(step, position, "outer step resolved");

        let search = bisect(
            |candidate| self.probe(&stepped, candidate, &mut simulator),
            0.0,
            1.0,
            self.plan.bisect_iterations,
        );
        let threshold = match search {
            Ok(bracket) => {
                tracing::debug!(step, lo = bracket.lo, hi = bracket.hi, "threshold bracketed");
                bracket.midpoint()
            }
            Err(BisectError::NoCrossing { lower, upper }) => {
                tracing::warn!(
                    step,
                    position,
                    lower,
                    upper,
                    "no crossing in search range, recording NaN"
                );
                f64::NAN
            }
            Err(BisectError::Predicate(error)) => return Err(error),
        };

        let settled = self
            .resolver
            .simplify(&bind_number(&stepped, &self.plan.threshold_key, threshold))?;
        let cells = swept
            .iter()
            .map(|column| {
                // Swept columns are template keys and rewriting never
                // drops a top-level key, so the lookup cannot miss.
                settled
                    .get(column)
                    .cloned()
                    .unwrap_or(Value::Number(f64::NAN))
            })
            .collect();

        Ok(SweepRecord {
            step,
            position,
            cells,
            threshold,
        })
    }

    /// One bisection probe: does `candidate` block propagation?
    fn probe<S: CableSimulator>(
        &self,
        stepped: &Config,
        candidate: f64,
        simulator: &mut S,
    ) -> Result<bool, SweepError> {
        let resolved = self
            .resolver
            .simplify(&bind_number(stepped, &self.plan.threshold_key, candidate))?;
        simulator.apply_parameters(&resolved)?;
        let propagated = simulator.run_and_check_propagation(
            self.plan.measurement_fraction,
            self.plan.threshold_voltage,
        )?;
        tracing::debug!(candidate, propagated, "bisection probe");
        Ok(!propagated)
    }
}

/// Clones a config with one key bound to a plain number.
fn bind_number(template: &Config, key: &str, value: f64) -> Config {
    let mut bound = template.clone();
    bound.insert(key.to_string(), Value::Number(value));
    bound
}
