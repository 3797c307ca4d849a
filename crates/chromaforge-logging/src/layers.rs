// ABOUTME: Output layers for the console and rotating-file sinks plus the level filter
// ABOUTME: The file sink hands back its worker guard so buffered lines flush on shutdown

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
};

use crate::config::{LogFormat, LoggingConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Stderr sink in the configured format
pub fn console_layer(format: LogFormat) -> BoxedLayer {
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().with_span_events(FmtSpan::CLOSE).boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    }
}

/// Daily-rotated plain-text file sink; creates the parent directory
pub fn file_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let (writer, guard) = non_blocking(rolling::daily(directory, file_name));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .boxed();

    Ok((layer, guard))
}

pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = config.filter_directives();
    EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter '{directives}'"))
}
