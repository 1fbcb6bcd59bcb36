//! Logging setup for the wcag binary.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "wcag=info,wcag_core=info";

pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// The terminal is owned by the TUI; only errors reach stderr.
    pub tui_mode: bool,
    /// Directory for the daily log files. `None` disables the file layer.
    pub logs_dir: Option<PathBuf>,
}

/// Holds the non-blocking file writer open. Drop it last.
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with a daily rolling file layer and a stderr layer.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`]. A logs directory that cannot
/// be created only disables file output.
pub fn init_logging(config: LogConfig<'_>) -> Result<LoggingGuard> {
    let mut file_guard = None;
    let file_layer = match config.logs_dir.as_deref().map(ensure_logs_dir) {
        Some(Ok(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, log_file_name(config.app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(default_filter()),
            )
        }
        Some(Err(err)) => {
            eprintln!("Warning: {:#}", err);
            None
        }
        None => None,
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(BoxMakeWriter::new(std::io::stderr))
        .with_filter(console_filter(&config));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard { _file: file_guard })
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn console_filter(config: &LogConfig<'_>) -> EnvFilter {
    if config.tui_mode {
        EnvFilter::new("error")
    } else if config.verbose {
        default_filter()
    } else {
        EnvFilter::new("warn")
    }
}

/// Create the logs directory if needed.
pub fn ensure_logs_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

fn log_file_name(app_name: &str) -> String {
    let base: String = app_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect();
    format!("{}.log", base)
}
