//! gpuscope - GPU inventory reporting
//!
//! Enumerates the graphics adapters known to the operating system, queries
//! the CUDA driver for compute capability where available, and reports
//! per-device descriptors with architecture and unit-count information.

mod hardware;
mod model;
mod nvidia;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::hardware::GpuVendor;
use crate::report::GpuReport;

/// gpuscope - Inspect the GPUs in this machine
#[derive(Parser)]
#[command(name = "gpuscope")]
#[command(version)]
#[command(about = "Report graphics adapters, their architecture and compute capacity")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and display the GPUs in this system (default)
    Detect,

    /// Print the full report as JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let probe = nvidia::platform_probe();

    match cli.command.unwrap_or(Commands::Detect) {
        Commands::Detect => {
            let report = GpuReport::collect(probe.as_ref())?;
            println!("{}", report.display());

            let nvidia_without_compute = report.devices.iter().any(|d| {
                d.general().vendor() == GpuVendor::Nvidia
                    && d.compute().compute_units().is_none()
            });
            if nvidia_without_compute {
                #[cfg(feature = "cuda")]
                let hint = "Compute capacity unavailable: the CUDA driver query failed.";
                #[cfg(not(feature = "cuda"))]
                let hint = "Compute capacity needs the CUDA driver; rebuild with --features cuda.";
                println!("\n{}", hint.yellow());
            }
        }
        Commands::Json => {
            let report = GpuReport::collect(probe.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
