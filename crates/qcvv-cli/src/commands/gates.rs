//! Gates command implementation.

use console::style;

use qcvv_ir::Clifford;

/// Execute the gates command.
pub fn execute() {
    println!("{} Single-qubit Clifford group (24 elements)\n", style("→").cyan().bold());
    println!(
        "  {:>3}  {:<6}  {:>5}  {:>5}  {:>5}",
        style("#").bold(),
        style("name").bold(),
        "X→",
        "Y→",
        "Z→"
    );
    for (index, gate) in Clifford::all().enumerate() {
        let name = gate.name().unwrap_or("-");
        println!(
            "  {:>3}  {:<6}  {:>5}  {:>5}  {:>5}",
            index,
            style(name).cyan(),
            gate.x_image().to_string(),
            gate.y_image().to_string(),
            gate.z_image().to_string()
        );
    }
}
