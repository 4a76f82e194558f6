//! Demo command implementation.

use anyhow::Result;
use console::style;

use pqloop_core::NetworkController;

use super::common::print_header;
use super::{classify, gates, search, watch};

/// Run every demonstration in sequence on one controller.
pub async fn execute(controller: &NetworkController) -> Result<()> {
    print_header("Continuous observation");
    watch::execute(controller, 16, 10).await?;

    print_header("Pattern search");
    search::execute(controller, "101", 5).await?;

    print_header("Constant/balanced classification");
    classify::execute(controller, 4, None).await?;

    print_header("Gates");
    gates::execute(controller).await?;

    print_header("Observation after gates");
    watch::execute(controller, 8, 10).await?;

    println!();
    println!("{} Demo complete", style("✓").green().bold());
    Ok(())
}
