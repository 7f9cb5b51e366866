//! Analyze command implementation.
//!
//! Reads a sample batch whose probabilities were filled in by an external
//! sampler and fits it.

use std::time::Instant;

use anyhow::Result;
use console::style;

use super::common::{Report, check_format, load_batch, print_report, write_json};

/// Execute the analyze command.
pub fn execute(input: &str, target: &str, format: &str, export: Option<&str>) -> Result<()> {
    check_format(format)?;
    let quiet = format == "json";
    if !quiet {
        println!(
            "{} Analysing {} from {}",
            style("→").cyan().bold(),
            style(input).green(),
            style(target).yellow()
        );
    }

    let start = Instant::now();
    let batch = load_batch(input)?;
    let experiment = batch.experiment()?;
    let table = experiment.process(&batch.samples)?;
    let result = experiment.analyze(&table)?.with_target(target);

    let report = Report::new(&result, &table, start.elapsed());
    print_report(&report, format)?;

    if let Some(path) = export {
        write_json(path, &report)?;
        if !quiet {
            println!("\n  Exported: {}", style(path).green());
        }
    }

    Ok(())
}
