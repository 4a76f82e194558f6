//! Gates command implementation.

use anyhow::Result;
use console::style;

use pqloop_core::NetworkController;

use super::common::{parse_bits, print_result, styled_bits};

/// Freeze a four-unit network at 1010, then apply a controlled flip on
/// (0, 1) and a double-controlled flip on (0, 2, 3).
pub async fn execute(controller: &NetworkController) -> Result<()> {
    println!("{} Gate walkthrough", style("→").cyan().bold());

    controller.start(4).await?;
    controller.stop().await?;
    controller.load(&parse_bits("1010")?).await?;
    print_result("Initial", styled_bits(&controller.measure().await?));

    controller.apply_conditional_flip(0, 1).await?;
    print_result("CNOT(0, 1)", styled_bits(&controller.measure().await?));

    controller.apply_conditional_flip2(0, 2, 3).await?;
    print_result("Toffoli(0, 2, 3)", styled_bits(&controller.measure().await?));

    Ok(())
}
