//! pqloop command-line interface.
//!
//! Drives a network of self-toggling pseudo-qubits: watch it run, search
//! for a bit pattern, classify oracles and walk through the gates.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{classify, common, demo, gates, search, version, watch};

/// pqloop - a concurrent network of self-toggling pseudo-qubits
#[derive(Parser)]
#[command(name = "pqloop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Network configuration file (YAML)
    #[arg(short, long, global = true, env = "PQLOOP_CONFIG")]
    config: Option<PathBuf>,

    /// Master entropy seed, overrides the configuration
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a network and print successive measurements
    Watch {
        /// Number of units
        #[arg(short = 'n', long, default_value = "16")]
        units: usize,

        /// Number of measurements to take
        #[arg(short, long, default_value = "10")]
        samples: usize,
    },

    /// Random-restart search for a target bit pattern
    Search {
        /// Target pattern, e.g. 101. The network gets one unit per bit.
        #[arg(short, long, default_value = "101")]
        target: String,

        /// Maximum number of rounds
        #[arg(short, long, default_value = "5")]
        iterations: usize,
    },

    /// Constant/balanced classification
    Classify {
        /// Number of units
        #[arg(short = 'n', long, default_value = "4")]
        units: usize,

        /// Oracle kind (constant, balanced). Both when omitted.
        #[arg(short, long)]
        oracle: Option<String>,
    },

    /// Controlled-flip walkthrough on 1010
    Gates,

    /// Run watch, search, classify and gates in sequence
    Demo,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Version => {
            version::execute();
            Ok(())
        }
        command => execute(command, cli.config.as_deref(), cli.seed).await,
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Execute a network command against a freshly configured controller.
async fn execute(command: Commands, config: Option<&Path>, seed: Option<u64>) -> anyhow::Result<()> {
    let controller = common::create_controller(config, seed)?;

    match command {
        Commands::Watch { units, samples } => watch::execute(&controller, units, samples).await,
        Commands::Search { target, iterations } => {
            search::execute(&controller, &target, iterations).await
        }
        Commands::Classify { units, oracle } => {
            classify::execute(&controller, units, oracle.as_deref()).await
        }
        Commands::Gates => gates::execute(&controller).await,
        Commands::Demo => demo::execute(&controller).await,
        Commands::Version => unreachable!("version is handled before a controller is built"),
    }
}
