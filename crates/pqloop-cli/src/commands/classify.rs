//! Classify command implementation.

use anyhow::{Context, Result};
use console::style;

use pqloop_core::{NetworkController, OracleKind};

use super::common::print_result;

/// Classify the requested oracle, or both kinds when none is given.
pub async fn execute(
    controller: &NetworkController,
    units: usize,
    oracle: Option<&str>,
) -> Result<()> {
    let oracles = match oracle {
        Some(name) => vec![
            name.parse::<OracleKind>()
                .with_context(|| format!("Unknown oracle: '{name}'"))?,
        ],
        None => vec![OracleKind::Constant, OracleKind::Balanced],
    };

    for oracle in oracles {
        println!(
            "{} Classifying a {} oracle on {} units",
            style("→").cyan().bold(),
            style(oracle).yellow(),
            units
        );
        let verdict = controller.classify(units, oracle).await?;
        print_result("Verdict", style(verdict).green().bold());
    }

    Ok(())
}
