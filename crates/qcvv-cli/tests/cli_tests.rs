//! CLI end-to-end tests.
//!
//! Tests drive the compiled `qcvv` binary and cover the build → external
//! sampling → analyze round trip through files.

use std::process::{Command, Output};

use qcvv_adapter_sim::SimulatorSampler;
use qcvv_bench::SampleBatch;

const ENV_KEYS: [&str; 6] = [
    "QCVV_CONFIG",
    "QCVV_NUM_CIRCUITS",
    "QCVV_DEPTHS",
    "QCVV_INTERLEAVED_GATE",
    "QCVV_SEED",
    "QCVV_SHOTS",
];

fn qcvv(args: &[&str]) -> Output {
    qcvv_with_env(args, &[])
}

fn qcvv_with_env(args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_qcvv"));
    command.args(args);
    for key in ENV_KEYS {
        command.env_remove(key);
    }
    command
        .envs(vars.iter().copied())
        .output()
        .expect("failed to launch qcvv")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// Informational commands
// ============================================================================

mod info {
    use super::*;

    #[test]
    fn test_version() {
        let output = qcvv(&["version"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_gates_lists_group() {
        let output = qcvv(&["gates"]);
        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains("24 elements"));
        for name in ["X", "H", "SXdg"] {
            assert!(text.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(!qcvv(&["calibrate"]).status.success());
    }
}

// ============================================================================
// run
// ============================================================================

mod run {
    use super::*;

    #[test]
    fn test_run_json_is_reproducible() {
        let args = [
            "run", "-n", "2", "-d", "1,4,8", "-g", "X", "--seed", "5", "-s", "200", "-f", "json",
        ];
        let first = qcvv(&args);
        assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
        let second = qcvv(&args);

        let a: serde_json::Value = serde_json::from_str(&stdout(&first)).unwrap();
        let b: serde_json::Value = serde_json::from_str(&stdout(&second)).unwrap();
        assert_eq!(a["result"], b["result"]);
        assert_eq!(a["result"]["experiment"], "IRB");
        assert_eq!(a["result"]["target"], "local_simulator");
        assert_eq!(a["result"]["total_circuits"], 12);
        assert_eq!(a["benchmark"]["name"], "irb_1q");
    }

    #[test]
    fn test_run_standard_rb_with_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("report.json");
        let output = qcvv(&[
            "run",
            "-n",
            "2",
            "-d",
            "1,5",
            "-g",
            "none",
            "-e",
            export.to_str().unwrap(),
        ]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout(&output).contains("Average gate error"));

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(report["result"]["experiment"], "RB");
        assert_eq!(report["table"]["rows"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_run_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("qcvv.yaml");
        std::fs::write(
            &config,
            "num_circuits: 1\ndepths: [1, 3]\ninterleaved_gate: H\nseed: 2\n",
        )
        .unwrap();

        // The flag overrides the file's depth list.
        let output = qcvv(&[
            "run",
            "-c",
            config.to_str().unwrap(),
            "-d",
            "2,4,6",
            "-f",
            "json",
        ]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["result"]["total_circuits"], 6);
    }

    #[test]
    fn test_invalid_configuration_exits_with_error() {
        let output = qcvv(&["run", "-g", "T"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));

        let output = qcvv(&["run", "-n", "0"]);
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_flags_take_precedence_over_environment() {
        let args = ["run", "-n", "3", "-g", "X", "-d", "1,4,8", "--seed", "1", "-f", "json"];
        let output = qcvv_with_env(
            &args,
            &[("QCVV_INTERLEAVED_GATE", "bogus"), ("QCVV_NUM_CIRCUITS", "0")],
        );
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["result"]["experiment"], "IRB");
        assert_eq!(report["result"]["total_circuits"], 18);

        // Without the flags the environment values apply and are rejected.
        let output = qcvv_with_env(
            &["run", "-f", "json"],
            &[("QCVV_INTERLEAVED_GATE", "bogus")],
        );
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_verbose_logs_configuration() {
        let output = qcvv(&["-v", "run", "-n", "1", "-d", "1,4", "--seed", "3", "-f", "json"]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let log = String::from_utf8_lossy(&output.stderr);
        assert!(log.contains("Loaded configuration"), "{log}");

        let quiet = qcvv(&["run", "-n", "1", "-d", "1,4", "--seed", "3", "-f", "json"]);
        assert!(!String::from_utf8_lossy(&quiet.stderr).contains("Loaded configuration"));
    }

    #[test]
    fn test_insufficient_depths_exits_with_error() {
        let output = qcvv(&["run", "-d", "5", "-f", "json"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot fit"));
    }
}

// ============================================================================
// build → external sampling → analyze
// ============================================================================

mod round_trip {
    use super::*;
    use qcvv_bench::Sampler;

    #[test]
    fn test_build_then_analyze() {
        let dir = tempfile::tempdir().unwrap();
        let batch_path = dir.path().join("batch.json");

        let output = qcvv(&[
            "build",
            "-n",
            "3",
            "-d",
            "1,5,10",
            "-g",
            "Z",
            "--seed",
            "17",
            "-o",
            batch_path.to_str().unwrap(),
        ]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

        let mut batch: SampleBatch =
            serde_json::from_str(&std::fs::read_to_string(&batch_path).unwrap()).unwrap();
        assert_eq!(batch.samples.len(), 18);
        assert!(batch.samples.iter().all(|s| s.probabilities.is_none()));

        // Analysing before sampling fails.
        let output = qcvv(&["analyze", "-i", batch_path.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1));

        // Fill in probabilities as an external sampler would.
        let mut sampler = SimulatorSampler::new()
            .with_depolarizing(0.01)
            .with_interleaved_noise(0.02);
        for sample in &mut batch.samples {
            sample.probabilities = Some(sampler.sample(&sample.circuit).unwrap());
        }
        std::fs::write(&batch_path, serde_json::to_string(&batch).unwrap()).unwrap();

        let output = qcvv(&[
            "analyze",
            "-i",
            batch_path.to_str().unwrap(),
            "-t",
            "lab_device",
            "-f",
            "json",
        ]);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["result"]["target"], "lab_device");

        let error = report["result"]["average_interleaved_gate_error"]
            .as_f64()
            .unwrap();
        let expected = (1.0 - 0.99 * 0.98) / 2.0;
        assert!((error - expected).abs() < 1e-9);
    }

    #[test]
    fn test_build_to_stdout() {
        let output = qcvv(&["build", "-n", "1", "-d", "2", "-g", "none", "--seed", "1"]);
        assert!(output.status.success());
        let batch: SampleBatch = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(batch.samples.len(), 1);
        assert_eq!(batch.interleaved_gate, None);
    }

    #[test]
    fn test_analyze_missing_file() {
        let output = qcvv(&["analyze", "-i", "/nonexistent/batch.json"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    }
}
