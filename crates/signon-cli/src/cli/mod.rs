//! CLI entry and dispatch.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use signon_core::MockAuthenticator;
use signon_core::config::{Config, paths};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "signon")]
#[command(version = "0.1")]
#[command(about = "Terminal sign-in client")]
struct Cli {
    /// Path to the config file (default: $SIGNON_HOME/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the mock authenticator delay in milliseconds
    #[arg(long, value_name = "MS")]
    mock_delay_ms: Option<u64>,

    /// Write logs to this file (default: $SIGNON_HOME/signon.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("load config")?;

    if let Some(ms) = cli.mock_delay_ms {
        config.mock_delay_ms = ms;
    }

    // Keep the guard alive for the whole run so buffered logs get flushed.
    let _guard = init_logging(cli.log_file.as_deref()).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move {
        let authenticator = Arc::new(MockAuthenticator::new(config.mock_delay()));
        signon_tui::run_login(&config, authenticator).await
    })
}

/// Initializes tracing with a non-blocking file writer.
///
/// The TUI owns the terminal, so logs never go to stdout/stderr.
fn init_logging(log_file: Option<&Path>) -> Result<WorkerGuard> {
    let path = log_file.map_or_else(paths::log_path, Path::to_path_buf);
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("log file path has no file name")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
