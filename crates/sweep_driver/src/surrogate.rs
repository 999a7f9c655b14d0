//! A closed-form stand-in for the excitable cable.
//!
//! Real conduction-block experiments integrate membrane kinetics along a
//! discretized fiber. That engine lives outside this workspace; tests,
//! benches, and the demo command need something cheap that still behaves
//! like a blockable cable. [`SurrogateCable`] is that stand-in: a
//! phenomenological model in which a heated or otherwise blocking region
//! attenuates the travelling spike, with attenuation growing smoothly in
//! blocking strength, block width, and temperature.

use crate::simulator::{CableSimulator, SimulatorError};
use sweep_core::types::{Config, Value};

/// Membrane resting potential, in mV.
pub const RESTING_POTENTIAL_MV: f64 = -65.0;

/// Spike height above resting potential for an unblocked fiber, in mV.
pub const SPIKE_AMPLITUDE_MV: f64 = 105.0;

/// Ambient temperature of an unheated fiber, in Celsius.
pub const BASELINE_TEMPERATURE_C: f64 = 16.0;

/// Block width at which attenuation reaches its nominal scale, in um.
pub const REFERENCE_WIDTH_UM: f64 = 40.0;

/// Fold increase in attenuation per 10 Celsius of ambient warming.
pub const KINETICS_Q10: f64 = 3.0;

/// A deterministic analytic cable model.
///
/// # Model
///
/// ```text
/// thermal = Q10 ^ ((temperature_c - 16) / 10)
/// damping = block_strength * (block_width_um / 40) * thermal
/// peak(f) = -65 + 105 * exp(-damping * f)
/// ```
///
/// The stimulus propagates past fraction `f` of the fiber when `peak(f)`
/// reaches the threshold voltage. With the conventional -45 mV criterion
/// the model has a single crossing in `block_strength` on `[0, 1]` for
/// widths above roughly 67 um, and no crossing for narrower blocks, so a
/// width sweep exercises both the bracketed and the no-crossing paths.
///
/// # Parameters
///
/// [`apply_parameters`](CableSimulator::apply_parameters) reads three keys
/// from the resolved config, each optional:
///
/// - `block_strength` - normalized blocking strength, usually in `[0, 1]`
/// - `block_width_um` - spatial extent of the blocking region
/// - `temperature_c` - ambient temperature of the fiber
///
/// Absent keys fall back to their defaults, so the applied state depends
/// only on the parameter set, never on earlier probes. Unrelated keys are
/// ignored.
///
/// # Examples
///
/// ```
/// use sweep_core::types::{Config, Value};
/// use sweep_driver::simulator::CableSimulator;
/// use sweep_driver::surrogate::SurrogateCable;
///
/// let mut cable = SurrogateCable::new();
/// let mut parameters = Config::new();
/// parameters.insert("block_strength".to_string(), Value::Number(0.9));
/// parameters.insert("block_width_um".to_string(), Value::Number(100.0));
///
/// cable.apply_parameters(&parameters).unwrap();
/// assert!(!cable.run_and_check_propagation(0.99, -45.0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurrogateCable {
    block_strength: f64,
    block_width_um: f64,
    temperature_c: f64,
}

impl Default for SurrogateCable {
    /// An unblocked fiber at ambient temperature.
    fn default() -> Self {
        Self {
            block_strength: 0.0,
            block_width_um: 0.0,
            temperature_c: BASELINE_TEMPERATURE_C,
        }
    }
}

impl SurrogateCable {
    /// Create an unblocked fiber at ambient temperature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fiber with a parameter set already applied.
    pub fn from_config(parameters: &Config) -> Result<Self, SimulatorError> {
        let mut cable = Self::new();
        cable.apply_parameters(parameters)?;
        Ok(cable)
    }

    /// Currently applied blocking strength.
    pub fn block_strength(&self) -> f64 {
        self.block_strength
    }

    /// Currently applied block width, in um.
    pub fn block_width_um(&self) -> f64 {
        self.block_width_um
    }

    /// Currently applied ambient temperature, in Celsius.
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Peak membrane response at a fraction of the fiber length, in mV.
    fn peak_response_mv(&self, fraction: f64) -> f64 {
        let thermal = KINETICS_Q10.powf((self.temperature_c - BASELINE_TEMPERATURE_C) / 10.0);
        let damping = self.block_strength * (self.block_width_um / REFERENCE_WIDTH_UM) * thermal;
        RESTING_POTENTIAL_MV + SPIKE_AMPLITUDE_MV * (-damping * fraction).exp()
    }
}

/// Pull one optional numeric field out of a resolved parameter set.
fn numeric_field(parameters: &Config, key: &str, fallback: f64) -> Result<f64, SimulatorError> {
    match parameters.get(key) {
        None => Ok(fallback),
        Some(Value::Number(n)) if n.is_finite() => Ok(*n),
        Some(Value::Number(_)) => Err(SimulatorError::invalid_parameters(format!(
            "`{key}` is not finite"
        ))),
        Some(_) => Err(SimulatorError::invalid_parameters(format!(
            "`{key}` is not a number"
        ))),
    }
}

impl CableSimulator for SurrogateCable {
    fn apply_parameters(&mut self, parameters: &Config) -> Result<(), SimulatorError> {
        let defaults = Self::default();
        let block_strength = numeric_field(parameters, "block_strength", defaults.block_strength)?;
        let block_width_um = numeric_field(parameters, "block_width_um", defaults.block_width_um)?;
        let temperature_c = numeric_field(parameters, "temperature_c", defaults.temperature_c)?;

        if block_width_um < 0.0 {
            return Err(SimulatorError::invalid_parameters(format!(
                "`block_width_um` is negative: {block_width_um}"
            )));
        }

        self.block_strength = block_strength;
        self.block_width_um = block_width_um;
        self.temperature_c = temperature_c;
        Ok(())
    }

    fn run_and_check_propagation(
        &mut self,
        measurement_fraction: f64,
        threshold_voltage: f64,
    ) -> Result<bool, SimulatorError> {
        if !(0.0..=1.0).contains(&measurement_fraction) {
            return Err(SimulatorError::invalid_parameters(format!(
                "measurement fraction {measurement_fraction} is outside the fiber"
            )));
        }
        if !threshold_voltage.is_finite() {
            return Err(SimulatorError::invalid_parameters(format!(
                "threshold voltage {threshold_voltage} is not finite"
            )));
        }

        let peak = self.peak_response_mv(measurement_fraction);
        tracing::debug!(
            strength = self.block_strength,
            width = self.block_width_um,
            peak_mv = peak,
            "surrogate run"
        );
        Ok(peak >= threshold_voltage)
    }
}
