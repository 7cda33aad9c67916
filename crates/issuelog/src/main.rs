//! issuelog - changelog generation from releases and closed issues
//!
//! Reads `issuelog.toml` (or `.yaml`) from the working directory or a
//! parent, loads the configured snapshot, and prints the changelog or writes
//! it to `changelog.file`.

mod exit_codes;

use std::process::ExitCode;

use anyhow::Context;
use console::style;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use issuelog_changelog::ChangelogGenerator;
use issuelog_core::config::load_config_or_default;
use issuelog_core::write_changelog;
use issuelog_hosting::SnapshotSource;

fn main() -> ExitCode {
    let _guard = init_tracing();

    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::from(exit_codes::for_error(&err))
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, config_path) = load_config_or_default(&cwd)?;
    info!(config = ?config_path, snapshot = %config.source.snapshot.display(), "starting");

    let source = SnapshotSource::from_file(&config.source.snapshot)?;
    let generator = ChangelogGenerator::new(&config.changelog)?;
    let changelog = generator.generate(&source)?;

    match &config.changelog.file {
        Some(path) => {
            write_changelog(path, &changelog)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} Changelog written to {}",
                style("✓").green().bold(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", changelog),
    }

    Ok(())
}

/// Set up tracing with two layers:
/// - Console: controlled by RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.issuelog/logs/
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let Some(log_dir) = log_directory() else {
        tracing_subscriber::registry().with(console_layer).init();
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(&log_dir, "issuelog.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();

    Some(guard)
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?.join(".issuelog").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
