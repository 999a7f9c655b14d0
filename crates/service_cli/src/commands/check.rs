//! Check command implementation
//!
//! Validates a configuration stack without running a sweep: loads the
//! layers, proves the template reaches a fixed point once the driven
//! keys are bound, builds the surrogate cable from the result and
//! reports the columns a sweep would emit.

use tracing::info;

use sweep_core::types::Value;
use sweep_driver::{swept_columns, SurrogateCable};

use crate::{config, CliError, Result};

/// Probe value bound to both driven keys when proving resolvability.
const PROBE_POSITION: f64 = 0.5;

/// Run the check command
pub fn run(config_files: &[String], swept_key: &str, threshold_key: &str) -> Result<()> {
    info!("Checking configuration...");
    info!("  Swept key: {}", swept_key);
    info!("  Threshold key: {}", threshold_key);

    if swept_key.is_empty() || threshold_key.is_empty() {
        return Err(CliError::InvalidArgument(
            "swept and threshold keys must be non-empty".to_string(),
        ));
    }
    if swept_key == threshold_key {
        return Err(CliError::InvalidArgument(format!(
            "swept key and threshold key must differ, both are '{}'",
            swept_key
        )));
    }

    let template = config::load_stack(config_files)?;

    for key in [swept_key, threshold_key] {
        if !template.contains_key(key) {
            return Err(CliError::InvalidArgument(format!(
                "key '{}' is not in the configuration",
                key
            )));
        }
    }

    // Bind both driven keys to a mid-range probe, exactly as the runner
    // would mid-sweep, and resolve the result.
    let mut probe = template.clone();
    probe.insert(swept_key.to_string(), Value::Number(PROBE_POSITION));
    probe.insert(threshold_key.to_string(), Value::Number(PROBE_POSITION));
    let resolved = config::resolver_for(config_files).simplify(&probe)?;

    // The surrogate must accept the resolved parameters.
    let cable = SurrogateCable::from_config(&resolved)?;

    let columns = swept_columns(&template, swept_key, threshold_key);

    println!("Configuration check");
    println!("----------------------------------------");
    println!("  Layers:        {}", config_files.len());
    println!("  Keys:          {}", template.len());
    println!("  Swept columns: {}", columns.len());
    println!();
    println!("{:<24} Value at {}", "Column", PROBE_POSITION);
    println!("----------------------------------------");
    for column in &columns {
        let cell = resolved.get(column).cloned().unwrap_or(Value::Number(f64::NAN));
        println!("{:<24} {}", column, cell);
    }
    println!("----------------------------------------");
    println!(
        "Surrogate cable accepted: width {} um at {} C",
        cable.block_width_um(),
        cable.temperature_c()
    );

    info!("Check complete");
    Ok(())
}
