//! Configuration loading and config file resolution
//!
//! Config file priority order:
//! 1. Command-line argument (highest priority, must exist)
//! 2. `WDT_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/wdt/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! Missing files at tiers 2 and 3 never terminate the program: a warning is
//! logged and compiled defaults are used.

use crate::batch::{BatchOptions, DEFAULT_OUTPUT_FILE};
use crate::measurement::ValidationPolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WDT_CONFIG";

/// Config directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "wdt";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub validation: ValidationPolicy,
    pub batch: BatchConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Batch table configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Single ASCII field delimiter
    pub delimiter: char,
    /// Default export path when none is given
    pub output_file: PathBuf,
    /// Keep rows that failed classification in the export
    pub include_invalid_rows: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            include_invalid_rows: true,
        }
    }
}

impl BatchConfig {
    /// Convert to reader/writer options
    ///
    /// # Errors
    /// Returns `Error::Config` if the delimiter is not a single ASCII
    /// character, or is the quote character or a line break
    pub fn options(&self) -> Result<BatchOptions> {
        if !self.delimiter.is_ascii() {
            return Err(Error::Config(format!(
                "batch.delimiter must be an ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(Error::Config(format!(
                "batch.delimiter cannot be {:?}",
                self.delimiter
            )));
        }

        Ok(BatchOptions {
            delimiter: self.delimiter as u8,
            include_invalid_rows: self.include_invalid_rows,
        })
    }
}

/// Where a resolved config path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine,
    Environment,
    PlatformDefault,
}

/// Config file resolver following the tiered priority order
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver with an optional command-line override
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Resolve the config file path, if any tier provides one
    ///
    /// The platform default path is only returned when the file exists.
    pub fn resolve(&self) -> Option<(PathBuf, ConfigSource)> {
        if let Some(path) = &self.cli_path {
            return Some((path.clone(), ConfigSource::CommandLine));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some((PathBuf::from(path), ConfigSource::Environment));
            }
        }

        default_config_path()
            .filter(|path| path.exists())
            .map(|path| (path, ConfigSource::PlatformDefault))
    }

    /// Resolve and load the configuration
    ///
    /// # Errors
    /// Returns `Error::Config` if a command-line path does not exist, or if
    /// any resolved file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<TomlConfig> {
        let Some((path, source)) = self.resolve() else {
            info!("No config file found, using compiled defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            if source == ConfigSource::CommandLine {
                return Err(Error::Config(format!("Config file not found: {}", path.display())));
            }
            warn!("Config file {} does not exist, using compiled defaults", path.display());
            return Ok(TomlConfig::default());
        }

        let config = read_toml_config(&path)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Platform config file location (`<config dir>/wdt/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Read and parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    // Surface a bad delimiter at load time rather than at first batch
    config.batch.options()?;
    Ok(config)
}

/// Write a TOML config file atomically (temp file + rename)
///
/// Parent directories are created if missing.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| Error::Toml(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}
