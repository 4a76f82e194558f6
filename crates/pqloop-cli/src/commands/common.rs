//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use pqloop_core::{BitSequence, NetworkConfig, NetworkController};

/// Load the network configuration and build an idle controller.
///
/// Precedence: `--seed`, then `PQLOOP_*` variables, then the file, then
/// defaults.
pub fn create_controller(config_path: Option<&Path>, seed: Option<u64>) -> Result<NetworkController> {
    let mut config = NetworkConfig::load(config_path).with_context(|| match config_path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid configuration in environment".to_string(),
    })?;
    if seed.is_some() {
        config.seed = seed;
    }
    tracing::debug!(?config, "Configuration loaded");

    Ok(NetworkController::new(config)?)
}

/// Parse a target pattern such as `101`.
pub fn parse_bits(input: &str) -> Result<BitSequence> {
    let bits: BitSequence = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid bit pattern: '{input}'"))?;
    if bits.is_empty() {
        anyhow::bail!("Bit pattern must not be empty");
    }
    Ok(bits)
}

/// Progress bar for a fixed number of steps.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(template) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        pb.set_style(template.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a section header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Render a bit sequence with set bits highlighted.
pub fn styled_bits(bits: &BitSequence) -> String {
    bits.iter()
        .map(|bit| {
            if bit.is_one() {
                style(bit.as_char()).green().bold().to_string()
            } else {
                style(bit.as_char()).dim().to_string()
            }
        })
        .collect()
}
