//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - interleaved randomized benchmarking",
        style("qcvv").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcvv-ir           Clifford group and circuit representation");
    println!("  qcvv-bench        RB/IRB circuit building, fitting and analysis");
    println!("  qcvv-adapter-sim  Local noisy single-qubit simulator");
    println!("  qcvv-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
