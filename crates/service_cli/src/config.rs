//! Configuration stack handling for CLI commands
//!
//! Commands accept one `--config` flag per layer. Layers load in the
//! order given, later files overriding earlier ones key by key, and
//! relative table file names resolve against the first file's
//! directory.

use std::path::Path;

use sweep_core::types::Config;
use sweep_resolve::{load_layered, Resolver};

use crate::{CliError, Result};

/// Load the configuration stack named by repeated `--config` flags.
pub fn load_stack(files: &[String]) -> Result<Config> {
    if files.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one --config file is required".to_string(),
        ));
    }

    for file in files {
        if !Path::new(file).exists() {
            return Err(CliError::FileNotFound(file.clone()));
        }
    }

    Ok(load_layered(files)?)
}

/// Build the resolver shared by every command.
///
/// Relative `csv_file` names inside action nodes resolve against the
/// directory of the first configuration file. A bare file name has no
/// directory, in which case tables resolve against the working
/// directory as usual.
pub fn resolver_for(files: &[String]) -> Resolver {
    let resolver = Resolver::new();
    match files.first().map(Path::new).and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => resolver.with_table_root(dir),
        _ => resolver,
    }
}
