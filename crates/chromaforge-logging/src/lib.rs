// ABOUTME: Structured logging for the chromaforge crates built on tracing
// ABOUTME: Re-exports the tracing macros and installs console/file sinks from a LoggingConfig

pub mod config;
pub mod layers;
pub mod performance;
pub mod subscriber;


pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{LogFormat, LogLevel, LoggingConfig, default_log_file};
pub use performance::{OperationStats, PerfStats, PerfTimer};
pub use subscriber::{LoggingGuard, init_subscriber};

use anyhow::Result;

/// Defaults plus `CHROMAFORGE_LOG*` / `RUST_LOG` overrides
pub fn init_logging() -> Result<LoggingGuard> {
    init_subscriber(&LoggingConfig::from_env()?)
}

/// Warnings only, console only; for callers that just want violations surfaced
pub fn init_quiet_logging() -> Result<LoggingGuard> {
    init_subscriber(&LoggingConfig {
        level: LogLevel::Warn,
        ..LoggingConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;
    use tracing_subscriber::{fmt, prelude::*};

    #[test]
    fn test_quiet_logging_installs_at_most_once() {
        let first = init_quiet_logging();
        let second = init_quiet_logging();
        assert!(second.is_err());
        drop(first);
    }

    #[test]
    fn test_structured_fields_reach_the_writer() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("fields.log");
        let file = Arc::new(fs::File::create(&log_path).unwrap());

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(file),
        );

        tracing::subscriber::with_default(subscriber, || {
            info!(token = "editor.background", "Theme token resolved");
            warn!(token = "list.hoverBackground", ratio = 1.8, "Insufficient contrast");
        });

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("Theme token resolved"), "{contents}");
        assert!(contents.contains("Insufficient contrast"), "{contents}");
        assert!(contents.contains("token=\"list.hoverBackground\""), "{contents}");
        assert!(contents.contains("ratio=1.8"), "{contents}");
    }
}
