//! Build command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{ConfigOverrides, load_config, make_rng, write_json};

/// Execute the build command.
pub fn execute(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    output: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let experiment = config.experiment()?;

    let mut rng = make_rng(config.seed);
    let samples = experiment.build_circuits(config.num_circuits, &config.depths, &mut rng)?;
    let count = samples.len();
    let batch = experiment.to_batch(samples);

    match output {
        Some(path) => {
            write_json(path, &batch)?;
            println!(
                "{} Wrote {} circuits to {}",
                style("✓").green().bold(),
                count,
                style(path).green()
            );
        }
        None => {
            let json = serde_json::to_string_pretty(&batch).context("JSON serialization failed")?;
            println!("{json}");
        }
    }

    Ok(())
}
