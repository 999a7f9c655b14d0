//! Cablesweep CLI - Command Line Operations for Threshold Sweeps
//!
//! This is the operational entry point for the Cablesweep parameter
//! sweep library.
//!
//! # Commands
//!
//! - `cablesweep sweep --config <file> --output <csv>` - Run a conduction-block threshold sweep
//! - `cablesweep resolve --config <file>` - Print a fully resolved configuration as JSON
//! - `cablesweep check --config <file>` - Validate a configuration without sweeping
//! - `cablesweep demo` - Run a built-in surrogate-cable sweep
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate orchestrates
//! `sweep_core`, `sweep_resolve` and `sweep_driver` behind a unified
//! command-line interface.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Cablesweep threshold-sweep CLI
#[derive(Parser)]
#[command(name = "cablesweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (repeat to layer overrides)
    #[arg(short, long, global = true)]
    config: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a conduction-block threshold sweep and stream rows to CSV
    Sweep {
        /// Output CSV file
        #[arg(short, long, default_value = "thresholds.csv")]
        output: String,

        /// Configuration key driven across the unit interval
        #[arg(long, default_value = "sweep_position")]
        swept_key: String,

        /// Configuration key bisected for the block threshold
        #[arg(long, default_value = "block_strength")]
        threshold_key: String,

        /// Number of outer sweep steps
        #[arg(short, long, default_value = "21")]
        steps: usize,

        /// Bisection iterations per step
        #[arg(short, long, default_value = "20")]
        iterations: usize,

        /// Cable simulator to run against (e.g. surrogate)
        #[arg(long, default_value = "surrogate")]
        simulator: String,
    },

    /// Resolve a configuration to a fixed point and print it as JSON
    Resolve {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a configuration and report its swept columns without sweeping
    Check {
        /// Configuration key driven across the unit interval
        #[arg(long, default_value = "sweep_position")]
        swept_key: String,

        /// Configuration key bisected for the block threshold
        #[arg(long, default_value = "block_strength")]
        threshold_key: String,
    },

    /// Run a built-in surrogate-cable sweep demonstration
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing, RUST_LOG taking precedence over --verbose
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Sweep {
            output,
            swept_key,
            threshold_key,
            steps,
            iterations,
            simulator,
        } => commands::sweep::run(
            &cli.config,
            &output,
            &swept_key,
            &threshold_key,
            steps,
            iterations,
            &simulator,
        ),
        Commands::Resolve { output } => commands::resolve::run(&cli.config, output.as_deref()),
        Commands::Check {
            swept_key,
            threshold_key,
        } => commands::check::run(&cli.config, &swept_key, &threshold_key),
        Commands::Demo => commands::demo::run(),
    }
}
