//! Resolve command implementation
//!
//! Loads the configuration stack, rewrites it to a fixed point and
//! prints the fully concrete result as pretty JSON.

use tracing::info;

use crate::{config, Result};

/// Run the resolve command
pub fn run(config_files: &[String], output: Option<&str>) -> Result<()> {
    info!("Resolving configuration...");
    info!("  Layers: {}", config_files.len());

    let template = config::load_stack(config_files)?;
    let resolved = config::resolver_for(config_files).simplify(&template)?;

    let rendered = serde_json::to_string_pretty(&resolved)?;

    match output {
        Some(path) => {
            info!("Writing resolved configuration to: {}", path);
            std::fs::write(path, rendered + "\n")?;
        }
        None => println!("{}", rendered),
    }

    info!("Resolution complete");
    Ok(())
}
