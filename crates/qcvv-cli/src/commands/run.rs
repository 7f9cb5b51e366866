//! Run command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qcvv_adapter_sim::SimulatorSampler;
use qcvv_bench::{BenchResult, ProbabilityRecord, Sampler};
use qcvv_ir::Circuit;

use super::common::{
    ConfigOverrides, Report, check_format, load_config, make_rng, print_report, shot_seed,
    write_json,
};

/// Advances a progress bar for every sampled circuit.
struct ProgressSampler<'a, S: Sampler> {
    inner: &'a mut S,
    bar: &'a ProgressBar,
}

impl<S: Sampler> Sampler for ProgressSampler<'_, S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn sample(&mut self, circuit: &Circuit) -> BenchResult<ProbabilityRecord> {
        let record = self.inner.sample(circuit);
        self.bar.inc(1);
        record
    }
}

/// Execute the run command.
pub fn execute(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
    format: &str,
    export: Option<&str>,
) -> Result<()> {
    check_format(format)?;
    let config = load_config(config_path, overrides)?;
    let experiment = config.experiment()?;
    let mut sampler = SimulatorSampler::from_config(&config.simulator, shot_seed(config.seed))
        .context("Failed to configure simulator")?;
    let quiet = format == "json";

    if !quiet {
        let gate = experiment
            .interleaved_gate()
            .map_or_else(|| "none (standard RB)".to_string(), |g| g.to_string());
        println!(
            "{} Running {} circuits per depth on {} (gate {})",
            style("→").cyan().bold(),
            config.num_circuits,
            style(sampler.name()).yellow(),
            style(gate).green()
        );
        println!("  Depths: {:?}", config.depths);
        if let Some(shots) = config.simulator.shots {
            println!("  Shots:  {shots}");
        }
    }

    let per_trial = if experiment.is_interleaved() { 2 } else { 1 };
    let total = config.num_circuits * config.depths.len() * per_trial;
    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} circuits")?
            .progress_chars("=> "),
    );

    let start = Instant::now();
    let mut rng = make_rng(config.seed);
    let mut progress = ProgressSampler {
        inner: &mut sampler,
        bar: &bar,
    };
    let run = experiment.run(config.num_circuits, &config.depths, &mut rng, &mut progress)?;
    bar.finish_and_clear();

    let report = Report::new(&run.result, &run.table, start.elapsed());
    print_report(&report, format)?;

    if let Some(path) = export {
        write_json(path, &report)?;
        if !quiet {
            println!("\n  Exported: {}", style(path).green());
        }
    }

    Ok(())
}
