//! Command-line argument model

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Path value meaning "write to standard output"
pub const STDOUT_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(
    name = "wdt-cli",
    version,
    about = "Classify waste items as organic or inorganic from physical measurements"
)]
pub struct Cli {
    /// Config file path (takes precedence over WDT_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for results and summaries
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a single waste item
    Classify {
        /// Weight in grams
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Volume in cubic centimetres
        #[arg(long, allow_hyphen_values = true)]
        volume: String,

        /// Moisture content in percent (0-100)
        #[arg(long, allow_hyphen_values = true)]
        moisture: String,

        /// Temperature in degrees Celsius
        #[arg(long, allow_hyphen_values = true)]
        temperature: String,

        /// Also show the normalized characteristic profile
        #[arg(long)]
        profile: bool,
    },

    /// Classify every row of a CSV table
    Batch {
        /// Input table with weight_g, volume_cm3, moisture_pct, temperature_c columns
        input: PathBuf,

        /// Output table path ("-" for stdout, which always writes CSV and sends
        /// the summary to the log instead of --format output); defaults to
        /// batch.output_file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Leave rows that could not be classified out of the output table
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Write a config file populated with defaults
    InitConfig {
        /// Target path; defaults to the platform config location
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
