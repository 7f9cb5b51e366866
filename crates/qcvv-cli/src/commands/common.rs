//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use qcvv_bench::config::parse_depths;
use qcvv_bench::{
    AnalysisResult, BenchmarkResult, ExperimentConfig, ResultTable, SampleBatch, Variant,
};

/// Command-line values that take precedence over file and environment configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub num_circuits: Option<usize>,
    pub depths: Option<String>,
    pub gate: Option<String>,
    pub seed: Option<u64>,
    pub shots: Option<u64>,
}

/// Resolve configuration: defaults, then the YAML file, then `QCVV_*`
/// variables, then command-line flags.
pub fn load_config(path: Option<&str>, overrides: &ConfigOverrides) -> Result<ExperimentConfig> {
    let mut config = ExperimentConfig::load_unvalidated(path)
        .with_context(|| format!("Failed to load configuration{}", describe_path(path)))?;

    apply_overrides(&mut config, overrides)?;

    config.validate().context("Invalid configuration")?;
    tracing::info!(
        num_circuits = config.num_circuits,
        depths = ?config.depths,
        gate = ?config.interleaved_gate,
        seed = ?config.seed,
        "Loaded configuration"
    );
    Ok(config)
}

/// Apply command-line values on top of a loaded configuration.
pub fn apply_overrides(config: &mut ExperimentConfig, overrides: &ConfigOverrides) -> Result<()> {
    if let Some(n) = overrides.num_circuits {
        config.num_circuits = n;
    }
    if let Some(depths) = &overrides.depths {
        config.depths =
            parse_depths(depths).ok_or_else(|| anyhow::anyhow!("Invalid depth list: '{depths}'"))?;
    }
    if let Some(gate) = &overrides.gate {
        config.interleaved_gate = Some(gate.clone());
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(shots) = overrides.shots {
        config.simulator.shots = Some(shots);
    }

    Ok(())
}

fn describe_path(path: Option<&str>) -> String {
    path.map(|p| format!(" from {p}")).unwrap_or_default()
}

/// Seeded RNG when a seed is configured, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Seed for the simulator's shot sampling, distinct from the circuit seed.
pub fn shot_seed(seed: Option<u64>) -> Option<u64> {
    seed.map(|s| s ^ SHOT_SEED_SALT)
}

const SHOT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Read a sample batch from a JSON file.
pub fn load_batch(path: &str) -> Result<SampleBatch> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let batch: SampleBatch = serde_json::from_str(&source)
        .with_context(|| format!("Invalid sample batch: {path}"))?;
    tracing::info!(path, samples = batch.samples.len(), "Loaded sample batch");
    Ok(batch)
}

/// Write a value as pretty JSON.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
    tracing::info!(path, "Wrote JSON output");
    Ok(())
}

/// Everything written by `--export` and printed with `--format json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub result: &'a AnalysisResult,
    pub table: &'a ResultTable,
    pub benchmark: BenchmarkResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a AnalysisResult, table: &'a ResultTable, duration: Duration) -> Self {
        Self {
            result,
            table,
            benchmark: result.to_benchmark_result(duration),
        }
    }
}

/// Print the analysis as JSON or as a table.
pub fn print_report(report: &Report<'_>, format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(report).context("JSON serialization failed")?;
            println!("{json}");
        }
        "table" => {
            print_decay_table(report.table);
            print_result(report.result);
            println!(
                "\n  Wall time: {}",
                style(format!("{:.2?}", report.benchmark.duration)).yellow()
            );
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
    Ok(())
}

/// Reject unknown output formats before doing any work.
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "table" | "json" => Ok(()),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
}

/// Mean survival per depth for each variant.
fn print_decay_table(table: &ResultTable) {
    let variants: Vec<Variant> = [Variant::Plain, Variant::Interleaved]
        .into_iter()
        .filter(|v| table.contains(*v))
        .collect();

    println!("\n  {:>6}  {}", style("depth").bold(), header(&variants));
    let interleaved: BTreeMap<usize, f64> = table
        .mean_survival_by_depth(Variant::Interleaved)
        .into_iter()
        .collect();
    for (depth, survival) in table.mean_survival_by_depth(Variant::Plain) {
        let mut line = format!("  {depth:>6}  {survival:>10.4}");
        if let Some(s) = interleaved.get(&depth) {
            line.push_str(&format!("  {s:>10.4}"));
        }
        println!("{line}");
    }
}

fn header(variants: &[Variant]) -> String {
    variants
        .iter()
        .map(|v| format!("{:>10}", format!("{v} f(m)")))
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_result(result: &AnalysisResult) {
    println!(
        "\n{} {} results on {} ({} circuits):",
        style("✓").green().bold(),
        result.variant(),
        style(result.target()).yellow(),
        result.total_circuits()
    );
    match result {
        AnalysisResult::Plain(r) => {
            println!(
                "  RB decay:            {:.6} ± {:.6}",
                r.rb_decay_coefficient, r.rb_decay_coefficient_std
            );
            println!(
                "  Average gate error:  {} ± {:.6}",
                style(format!("{:.6}", r.average_gate_error)).cyan().bold(),
                r.average_gate_error_std
            );
        }
        AnalysisResult::Interleaved(r) => {
            println!(
                "  RB decay:            {:.6} ± {:.6}",
                r.rb_decay_coefficient, r.rb_decay_coefficient_std
            );
            println!(
                "  IRB decay:           {:.6} ± {:.6}",
                r.irb_decay_coefficient, r.irb_decay_coefficient_std
            );
            println!(
                "  Interleaved error:   {} ± {:.6}",
                style(format!("{:.6}", r.average_interleaved_gate_error))
                    .cyan()
                    .bold(),
                r.average_interleaved_gate_error_std
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_shot_seed_differs_from_circuit_seed() {
        assert_eq!(shot_seed(None), None);
        for seed in [0, 1, 42, u64::MAX] {
            let derived = shot_seed(Some(seed)).unwrap();
            assert_ne!(derived, seed);
            assert_eq!(shot_seed(Some(seed)), Some(derived));
        }

        let mut circuits = make_rng(Some(7));
        let mut shots = make_rng(shot_seed(Some(7)));
        let a: Vec<u64> = (0..4).map(|_| circuits.r#gen()).collect();
        let b: Vec<u64> = (0..4).map(|_| shots.r#gen()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_flags_override_invalid_environment_values() {
        let overrides = ConfigOverrides {
            num_circuits: Some(3),
            gate: Some("X".to_string()),
            ..Default::default()
        };
        let mut config = ExperimentConfig::default()
            .merge_env_with(|key| match key {
                "QCVV_INTERLEAVED_GATE" => Some("bogus".to_string()),
                "QCVV_NUM_CIRCUITS" => Some("0".to_string()),
                _ => None,
            })
            .unwrap();
        assert!(config.validate().is_err());

        apply_overrides(&mut config, &overrides).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_circuits, 3);
        assert_eq!(config.interleaved_clifford().unwrap(), Some(qcvv_ir::Clifford::X));
    }
}
