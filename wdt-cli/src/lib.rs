//! wdt-cli library - command dispatch for the Waste Detection Tool
//!
//! The binary parses arguments, loads configuration and initializes logging;
//! everything after that lives here so it can be driven from tests.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};
use wdt_common::batch::BatchClassifier;
use wdt_common::config::{default_config_path, write_toml_config, TomlConfig};
use wdt_common::{Classifier, Measurement};

pub mod cli;
pub mod render;

use cli::{Cli, Command, OutputFormat, STDOUT_PATH};
use render::{BatchOutcome, ClassificationReport};

/// Execute a parsed command, writing user-facing output to `out`
pub fn run<W: Write>(cli: Cli, config: &TomlConfig, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Classify {
            weight,
            volume,
            moisture,
            temperature,
            profile,
        } => {
            let measurement = Measurement::parse(&weight, &volume, &moisture, &temperature)?;
            let result = Classifier::new(config.validation).classify_measurement(&measurement)?;
            let report = ClassificationReport::new(measurement, result, profile);

            match cli.format {
                OutputFormat::Text => write!(out, "{}", render::render_classification(&report))?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
            }
        }

        Command::Batch {
            input,
            output,
            skip_invalid,
        } => {
            let mut options = config.batch.options()?;
            if skip_invalid {
                options.include_invalid_rows = false;
            }

            let batch = BatchClassifier::new(Classifier::new(config.validation), options);
            let report = batch
                .classify_path(&input)
                .with_context(|| format!("Failed to classify {}", input.display()))?;

            let output = output.unwrap_or_else(|| config.batch.output_file.clone());
            let to_stdout = output.as_path() == Path::new(STDOUT_PATH);

            if to_stdout {
                report.write_csv(&mut *out, &options)?;
            } else {
                report
                    .write_csv_path(&output, &options)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            }

            let outcome = BatchOutcome {
                summary: report.summary(),
                errors: report.errors().collect(),
                output: (!to_stdout).then_some(output.as_path()),
            };

            if !outcome.errors.is_empty() {
                warn!("{} row(s) could not be classified", outcome.errors.len());
            }

            // Table already occupies stdout; summary goes to the log only
            if to_stdout {
                if cli.format == OutputFormat::Json {
                    warn!("--format json does not apply when the table is written to stdout");
                }
                info!(
                    "Rows: {}, organic: {}, inorganic: {}, invalid: {}",
                    outcome.summary.total_rows,
                    outcome.summary.organic_count,
                    outcome.summary.inorganic_count,
                    outcome.summary.invalid
                );
                return Ok(());
            }

            match cli.format {
                OutputFormat::Text => write!(out, "{}", render::render_batch(&outcome))?,
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?,
            }
        }

        Command::InitConfig { path, force } => {
            let path = match path {
                Some(path) => path,
                None => default_config_path().context("Could not determine config directory")?,
            };
            init_config(&path, force)?;
            writeln!(out, "Wrote default configuration to {}", path.display())?;
        }
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    write_toml_config(&TomlConfig::default(), path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Default configuration written to {}", path.display());
    Ok(())
}
