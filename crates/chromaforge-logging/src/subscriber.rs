// ABOUTME: Global subscriber installation from a LoggingConfig
// ABOUTME: Returns a guard that must be held for the file sink to keep flushing

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::layers::{BoxedLayer, console_layer, env_filter, file_layer};

/// Keeps the non-blocking file writer alive; drop it at shutdown
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    file: Option<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_sink(&self) -> bool {
        self.file.is_some()
    }
}

/// Output layers enabled by `config`, with the guard for the file sink
pub fn build_layers(config: &LoggingConfig) -> Result<(Vec<BoxedLayer>, LoggingGuard)> {
    let mut layers = Vec::new();
    let mut guard = LoggingGuard::default();

    if config.console {
        layers.push(console_layer(config.format));
    }
    if let Some(path) = &config.file {
        let (layer, file_guard) = file_layer(path)?;
        layers.push(layer);
        guard.file = Some(file_guard);
    }

    Ok((layers, guard))
}

/// Install the global subscriber; fails if one is already set
pub fn init_subscriber(config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = env_filter(config)?;
    let (layers, guard) = build_layers(config)?;

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::info!(
        filter = %config.filter_directives(),
        format = ?config.format,
        console = config.console,
        file = ?config.file,
        "Chromaforge logging initialized"
    );

    Ok(guard)
}
