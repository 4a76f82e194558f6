//! Search command implementation.

use anyhow::Result;
use console::style;

use pqloop_core::{NetworkController, SearchOutcome};

use super::common::{parse_bits, print_result, styled_bits};

/// Start one unit per target bit and search for the pattern.
pub async fn execute(controller: &NetworkController, target: &str, iterations: usize) -> Result<()> {
    let target = parse_bits(target)?;

    println!(
        "{} Searching for {} (at most {} rounds)",
        style("→").cyan().bold(),
        style(&target).green(),
        iterations
    );

    controller.start(target.len()).await?;
    let outcome = controller.amplify_towards(&target, iterations).await;
    controller.stop().await?;

    print_outcome(&outcome?);
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    print_result("Measurement", styled_bits(&outcome.measurement));
    print_result("Rounds", outcome.iterations);
    if outcome.success {
        println!("{} Target found", style("✓").green().bold());
    } else {
        println!("{} Target not found", style("✗").red().bold());
    }
}
