//! End-to-end tests for the wdt-cli binary and its command dispatch
//!
//! Tests cover:
//! - Argument parsing (negative values, global flags)
//! - Single classification in text and JSON
//! - Batch runs to file and stdout
//! - Config file handling and init-config

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use wdt_cli::cli::{Cli, Command as CliCommand, OutputFormat};
use wdt_common::config::{read_toml_config, TomlConfig};

const SAMPLE: &str = "\
item,weight_g,volume_cm3,moisture_pct,temperature_c
banana peel,120,150,80,30
bottle cap,20,50,10,15
broken,abc,10,10,10
";

/// Test helper: binary with config lookup isolated from the host
fn wdt(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wdt-cli").unwrap();
    cmd.env("WDT_CONFIG", temp_dir.path().join("absent.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn run_to_string(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    wdt_cli::run(cli, &TomlConfig::default(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_negative_temperature() {
    let cli = Cli::try_parse_from([
        "wdt-cli", "classify", "--weight", "500", "--volume", "500", "--moisture", "0",
        "--temperature", "-5",
    ])
    .unwrap();

    match cli.command {
        CliCommand::Classify { temperature, .. } => assert_eq!(temperature, "-5"),
        other => panic!("unexpected command: {:?}", other),
    }
    assert_eq!(cli.format, OutputFormat::Text);
}

#[test]
fn test_parse_requires_all_measurements() {
    let result = Cli::try_parse_from(["wdt-cli", "classify", "--weight", "10"]);
    assert!(result.is_err());
}

#[test]
fn test_run_classify_text() {
    let text = run_to_string(&[
        "wdt-cli", "classify", "--weight", "500", "--volume", "500", "--moisture", "50",
        "--temperature", "20",
    ]);

    assert!(text.contains("Result: INORGANIC WASTE"));
    assert!(text.contains("Confidence: 74.00%"));
    assert!(text.contains("Rule: weighted_score"));
    assert!(text.contains("Recycle"));
}

#[test]
fn test_run_classify_json_with_profile() {
    let text = run_to_string(&[
        "wdt-cli", "--format", "json", "classify", "--weight", "10", "--volume", "10",
        "--moisture", "70", "--temperature", "30", "--profile",
    ]);

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["result"]["label"], "ORGANIC");
    assert_eq!(json["result"]["confidence"], 0.85);
    assert_eq!(json["result"]["rule"], "warm_moist");
    assert_eq!(json["recommendations"][0]["title"], "Compost");
    assert!(json["profile"]["moisture"].is_number());
}

#[test]
fn test_run_classify_rejects_non_numeric() {
    let cli = Cli::try_parse_from([
        "wdt-cli", "classify", "--weight", "heavy", "--volume", "10", "--moisture", "10",
        "--temperature", "10",
    ])
    .unwrap();

    let mut out = Vec::new();
    let err = wdt_cli::run(cli, &TomlConfig::default(), &mut out).unwrap_err();
    assert!(err.to_string().contains("weight_g is not numeric"));
}

#[test]
fn test_run_batch_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.csv");
    std::fs::write(&input, SAMPLE).unwrap();

    let text = run_to_string(&["wdt-cli", "batch", input.to_str().unwrap(), "-o", "-"]);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("label,confidence,recommendation"));
    assert!(lines[1].ends_with("ORGANIC,0.85,Compost"));
    assert!(lines[2].ends_with("INORGANIC,0.78,Recycle"));
    assert!(lines[3].ends_with(",,,"));
}

#[test]
fn test_binary_classify() {
    let temp_dir = TempDir::new().unwrap();
    wdt(&temp_dir)
        .args([
            "classify", "--weight", "20", "--volume", "50", "--moisture", "10", "--temperature",
            "15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: INORGANIC WASTE"))
        .stdout(predicate::str::contains("Confidence: 78.00%"));
}

#[test]
fn test_binary_rejects_moisture_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    wdt(&temp_dir)
        .args([
            "classify", "--weight", "20", "--volume", "50", "--moisture", "101", "--temperature",
            "15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("moisture_pct out of range"));
}

#[test]
fn test_binary_batch_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("results.csv");
    std::fs::write(&input, SAMPLE).unwrap();

    wdt(&temp_dir)
        .arg("batch")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--skip-invalid")
        .assert()
        .success()
        .stdout(predicate::str::contains("Organic waste: 1"))
        .stdout(predicate::str::contains("Inorganic waste: 1"))
        .stdout(predicate::str::contains("Invalid rows: 1"))
        .stdout(predicate::str::contains("row 3:"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert!(!written.contains("broken"));
}

#[test]
fn test_binary_batch_json_summary() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.csv");
    let output = temp_dir.path().join("results.csv");
    std::fs::write(&input, SAMPLE).unwrap();

    let assert = wdt(&temp_dir)
        .arg("--format")
        .arg("json")
        .arg("batch")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let json: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["summary"]["total_rows"], 3);
    assert_eq!(json["summary"]["invalid"], 1);
    assert_eq!(json["errors"][0]["row"], 3);
}

#[test]
fn test_binary_batch_missing_column_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.csv");
    std::fs::write(&input, "weight_g,volume_cm3\n1,2\n").unwrap();

    wdt(&temp_dir)
        .arg("batch")
        .arg(&input)
        .arg("-o")
        .arg("-")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required column"));
}

#[test]
fn test_binary_uses_config_delimiter() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    let input = temp_dir.path().join("input.csv");
    std::fs::write(&config, "[batch]\ndelimiter = \";\"\n").unwrap();
    std::fs::write(&input, "weight_g;volume_cm3;moisture_pct;temperature_c\n20;50;10;15\n").unwrap();

    wdt(&temp_dir)
        .arg("--config")
        .arg(&config)
        .arg("batch")
        .arg(&input)
        .arg("-o")
        .arg("-")
        .assert()
        .success()
        .stdout(predicate::str::contains("20;50;10;15;INORGANIC;0.78;Recycle"));
}

#[test]
fn test_binary_missing_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    wdt(&temp_dir)
        .arg("--config")
        .arg(temp_dir.path().join("nope.toml"))
        .args([
            "classify", "--weight", "1", "--volume", "1", "--moisture", "1", "--temperature", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_binary_logs_missing_env_config_fallback() {
    let temp_dir = TempDir::new().unwrap();
    wdt(&temp_dir)
        .args([
            "classify", "--weight", "20", "--volume", "50", "--moisture", "10", "--temperature",
            "15",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("absent.toml does not exist, using compiled defaults"));
}

#[test]
fn test_binary_applies_configured_log_level() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    let args = [
        "classify", "--weight", "20", "--volume", "50", "--moisture", "10", "--temperature", "15",
    ];

    std::fs::write(&config, "[logging]\nlevel = \"warn\"\n").unwrap();
    wdt(&temp_dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting wdt-cli").not());

    std::fs::write(&config, "[logging]\nlevel = \"debug\"\n").unwrap();
    wdt(&temp_dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .assert()
        .success()
        .stderr(predicate::str::contains("Classified measurement"));
}

#[test]
fn test_binary_batch_stdout_warns_json_format_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.csv");
    std::fs::write(&input, SAMPLE).unwrap();

    wdt(&temp_dir)
        .args(["--format", "json", "batch"])
        .arg(&input)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("item,weight_g"))
        .stderr(predicate::str::contains(
            "--format json does not apply when the table is written to stdout",
        ));
}

#[test]
fn test_binary_init_config() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("wdt").join("config.toml");

    wdt(&temp_dir)
        .arg("init-config")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"));

    let parsed = read_toml_config(&target).unwrap();
    assert_eq!(parsed, TomlConfig::default());

    // Second run refuses to overwrite without --force
    wdt(&temp_dir)
        .arg("init-config")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    wdt(&temp_dir)
        .arg("init-config")
        .arg(&target)
        .arg("--force")
        .assert()
        .success();
}
