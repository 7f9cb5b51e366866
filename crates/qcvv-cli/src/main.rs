//! qcvv Command-Line Interface
//!
//! Runs interleaved randomized benchmarking experiments on the local noisy
//! simulator, or builds circuit batches for an external sampler and
//! analyses the probabilities it returns.
//!
//! ```text
//! qcvv run --gate X --depths 1,10,50 --seed 7
//! qcvv build -o batch.json && <sample elsewhere> && qcvv analyze -i batch.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::ConfigOverrides;
use commands::{analyze, build, gates, run, version};

/// qcvv - interleaved randomized benchmarking for single-qubit Clifford gates
#[derive(Parser)]
#[command(name = "qcvv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Experiment settings shared by `run` and `build`.
#[derive(Args)]
struct ExperimentArgs {
    /// YAML configuration file
    #[arg(short, long, env = "QCVV_CONFIG")]
    config: Option<String>,

    /// Random sequences per depth
    #[arg(short, long)]
    num_circuits: Option<usize>,

    /// Comma-separated sequence depths (e.g. 1,5,10)
    #[arg(short, long)]
    depths: Option<String>,

    /// Gate under test (X, Y, Z, H, S, SX, ...), or "none" for standard RB
    #[arg(short, long)]
    gate: Option<String>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl ExperimentArgs {
    fn overrides(&self, shots: Option<u64>) -> ConfigOverrides {
        ConfigOverrides {
            num_circuits: self.num_circuits,
            depths: self.depths.clone(),
            gate: self.gate.clone(),
            seed: self.seed,
            shots,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build, simulate and analyse an experiment
    Run {
        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Shots per circuit (exact probabilities if omitted)
        #[arg(short, long)]
        shots: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the result table and analysis as JSON
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Build circuits and write them as a sample batch
    Build {
        #[command(flatten)]
        experiment: ExperimentArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Analyse a sample batch whose probabilities were filled externally
    Analyze {
        /// Sample batch JSON
        #[arg(short, long)]
        input: String,

        /// Name of the backend that sampled the batch
        #[arg(short, long, default_value = "external")]
        target: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write the result table and analysis as JSON
        #[arg(short, long)]
        export: Option<String>,
    },

    /// List the 24 single-qubit Clifford elements
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            experiment,
            shots,
            format,
            export,
        } => run::execute(
            experiment.config.as_deref(),
            &experiment.overrides(shots),
            &format,
            export.as_deref(),
        ),

        Commands::Build { experiment, output } => build::execute(
            experiment.config.as_deref(),
            &experiment.overrides(None),
            output.as_deref(),
        ),

        Commands::Analyze {
            input,
            target,
            format,
            export,
        } => analyze::execute(&input, &target, &format, export.as_deref()),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
