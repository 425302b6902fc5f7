//! wdt-cli - Waste Detection Tool command-line front end
//!
//! Classifies waste items as organic or inorganic from weight, volume,
//! moisture and temperature, one at a time or as a CSV batch.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};
use wdt_cli::cli::Cli;
use wdt_common::config::{ConfigResolver, LoggingConfig};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing must be up before config loading so fallback warnings are seen
    let filter_handle = init_tracing();
    let config = ConfigResolver::new(cli.config.clone()).load()?;
    if let Some(handle) = filter_handle {
        handle.reload(EnvFilter::new(&config.logging.level))?;
    }

    info!("Starting wdt-cli v{}", env!("CARGO_PKG_VERSION"));
    debug!("Effective configuration: {:?}", config);

    let stdout = std::io::stdout();
    wdt_cli::run(cli, &config, &mut stdout.lock())
}

/// Log to stderr, filtered by RUST_LOG when set
///
/// Without RUST_LOG the default level applies until the configured level is
/// known; the returned handle swaps it in. `None` means RUST_LOG is in charge.
fn init_tracing() -> Option<FilterHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(LoggingConfig::default().level), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    (!from_env).then_some(handle)
}
