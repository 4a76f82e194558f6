//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - concurrent pseudo-qubit network",
        style("pqloop").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  pqloop-core  Units, gates, measurement and search heuristics");
    println!("  pqloop-cli   Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
