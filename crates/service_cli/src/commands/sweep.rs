//! Sweep command implementation
//!
//! Runs the full conduction-block threshold sweep against the surrogate
//! cable and streams finished rows to a CSV file.

use std::path::Path;

use tracing::info;

use sweep_driver::{RecordWriter, SurrogateCable, SweepPlan, SweepRunner};

use crate::{config, CliError, Result};

/// Run the sweep command
pub fn run(
    config_files: &[String],
    output: &str,
    swept_key: &str,
    threshold_key: &str,
    steps: usize,
    iterations: usize,
    simulator: &str,
) -> Result<()> {
    info!("Starting threshold sweep...");
    info!("  Swept key: {}", swept_key);
    info!("  Threshold key: {}", threshold_key);
    info!("  Outer steps: {}", steps);
    info!("  Simulator: {}", simulator);
    info!("  Output: {}", output);

    match simulator {
        "surrogate" => {}
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown simulator: {}. Supported: surrogate",
                other
            )));
        }
    }

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

    let plan = SweepPlan::new(swept_key, threshold_key)
        .with_outer_steps(steps)
        .with_bisect_iterations(iterations);
    let runner = SweepRunner::new(plan).with_resolver(config::resolver_for(config_files));

    // Create the output directory if it doesn't exist
    if let Some(dir) = Path::new(output).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut writer = RecordWriter::create(output)?;
    writer.write_header(&runner.output_columns(&template))?;

    let summary = runner.run(&template, SurrogateCable::from_config, |record| {
        writer.write_record(record)
    })?;

    info!(
        "Sweep complete: {} rows written, {} without a crossing",
        summary.records.len(),
        summary.no_crossing_rows
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ======== End-to-end sweep ========

    #[test]
    fn test_sweep_streams_rows_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("cable.json");
        std::fs::write(
            &config_path,
            r#"{
                "sweep_position": 0.0,
                "block_strength": 0.0,
                "block_width_um": {"action": "interpolate", "example_inputs": [0, 1],
                                   "example_outputs": [100, 200], "new_input": "sweep_position"}
            }"#,
        )
        .unwrap();
        let output = dir.path().join("out.csv");

        let files = vec![config_path.display().to_string()];
        run(
            &files,
            &output.display().to_string(),
            "sweep_position",
            "block_strength",
            3,
            20,
            "surrogate",
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("block_width_um,block_strength"));
        assert_eq!(lines.count(), 3);
    }

    // ======== Argument validation ========

    #[test]
    fn test_equal_keys_are_rejected() {
        let err = run(&[], "out.csv", "same", "same", 3, 20, "surrogate").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = run(&[], "out.csv", "", "block_strength", 3, 20, "surrogate").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_unknown_simulator_is_rejected() {
        let err = run(&[], "out.csv", "sweep_position", "block_strength", 3, 20, "neuron")
            .unwrap_err();
        assert!(err.to_string().contains("Unknown simulator"));
    }
}
