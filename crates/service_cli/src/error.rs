//! Error types for the Cablesweep CLI
//!
//! Wraps the errors of every library layer together with the I/O and
//! serialisation failures specific to the command-line surface.

use thiserror::Error;

use sweep_driver::{SimulatorError, SweepError};
use sweep_resolve::{ResolveError, SourceError};

/// Errors surfaced by CLI commands.
///
/// # Variants
///
/// - `FileNotFound`: A path named on the command line does not exist
/// - `InvalidArgument`: A command-line argument failed validation
/// - `Source`: Loading or parsing a configuration document failed
/// - `Resolve`: Rewriting a configuration to a fixed point failed
/// - `Sweep`: The threshold sweep itself failed
/// - `Simulator`: The cable simulator rejected the resolved parameters
/// - `Io`: A filesystem operation failed
/// - `Json`: Rendering the resolved configuration as JSON failed
#[derive(Error, Debug)]
pub enum CliError {
    /// A path named on the command line does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument failed validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Loading or parsing a configuration document failed
    #[error("Configuration loading failed: {0}")]
    Source(#[from] SourceError),

    /// Rewriting a configuration to a fixed point failed
    #[error("Configuration resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The threshold sweep itself failed
    #[error("Sweep failed: {0}")]
    Sweep(#[from] SweepError),

    /// The cable simulator rejected the resolved parameters
    #[error("Cable simulator failed: {0}")]
    Simulator(#[from] SimulatorError),

    /// A filesystem operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the resolved configuration as JSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
