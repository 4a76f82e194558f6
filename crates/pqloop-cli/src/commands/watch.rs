//! Watch command implementation.

use anyhow::Result;
use console::style;

use pqloop_core::NetworkController;

use super::common::{create_progress_bar, print_result, styled_bits};

/// Start `units` units and print `samples` measurements.
pub async fn execute(controller: &NetworkController, units: usize, samples: usize) -> Result<()> {
    println!(
        "{} Observing {} units ({} samples)",
        style("→").cyan().bold(),
        style(units).green(),
        samples
    );

    controller.start(units).await?;
    print_result("Slot storage", format!("{} bytes", controller.footprint_bytes().await));

    let pb = create_progress_bar(samples as u64, "measuring");
    let observed = async {
        for sample in 1..=samples {
            let bits = controller.measure().await?;
            pb.println(format!("  {:>3}  {}", sample, styled_bits(&bits)));
            pb.inc(1);
        }
        Ok::<_, pqloop_core::NetError>(())
    }
    .await;
    pb.finish_and_clear();

    controller.stop().await?;
    observed?;

    println!("{} Network stopped", style("✓").green().bold());
    Ok(())
}
