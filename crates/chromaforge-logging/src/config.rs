// ABOUTME: Logging configuration: verbosity, per-crate overrides, output format and file sink
// ABOUTME: Environment overrides are read through a lookup function so they can be tested without touching the process env

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

pub const ENV_LEVEL: &str = "CHROMAFORGE_LOG";
pub const ENV_JSON: &str = "CHROMAFORGE_LOG_JSON";
pub const ENV_NO_CONSOLE: &str = "CHROMAFORGE_LOG_NO_CONSOLE";
pub const ENV_FILE: &str = "CHROMAFORGE_LOG_FILE";
pub const ENV_NO_FILE: &str = "CHROMAFORGE_LOG_NO_FILE";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Verbosity, serialized in lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => bail!("Invalid log level '{s}'. Must be one of: trace, debug, info, warn, error"),
        })
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Shape of each emitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global verbosity
    pub level: LogLevel,

    /// Per-target overrides such as `chromaforge_color = "trace"`
    pub targets: BTreeMap<String, LogLevel>,

    /// Format of the console sink
    pub format: LogFormat,

    /// Write to stderr
    pub console: bool,

    /// Daily-rotated log file; `None` disables the file sink
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        // The engine is a library; writing files is opt-in
        Self {
            level: LogLevel::Info,
            targets: BTreeMap::new(),
            format: LogFormat::Compact,
            console: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Defaults with the process environment applied
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `CHROMAFORGE_LOG*` and `RUST_LOG` values yielded by `lookup`.
    ///
    /// `CHROMAFORGE_LOG` wins over `RUST_LOG`. Flag variables only need to be
    /// present. An empty `CHROMAFORGE_LOG_FILE` selects the default path.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level
                .parse()
                .with_context(|| format!("Invalid {ENV_LEVEL} value"))?;
        } else if let Some(directives) = lookup(ENV_RUST_LOG) {
            self.apply_directives(&directives)
                .with_context(|| format!("Invalid {ENV_RUST_LOG} value"))?;
        }

        if lookup(ENV_JSON).is_some() {
            self.format = LogFormat::Json;
        }
        if lookup(ENV_NO_CONSOLE).is_some() {
            self.console = false;
        }
        if let Some(path) = lookup(ENV_FILE) {
            self.file = Some(if path.is_empty() {
                default_log_file()
            } else {
                PathBuf::from(path)
            });
        }
        if lookup(ENV_NO_FILE).is_some() {
            self.file = None;
        }

        Ok(())
    }

    /// Parse `RUST_LOG`-style directives, e.g. `info,chromaforge_tokens=debug`
    pub fn apply_directives(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    let level = level
                        .parse()
                        .with_context(|| format!("Invalid level for target '{target}'"))?;
                    self.targets.insert(target.trim().to_string(), level);
                }
                None => self.level = directive.parse()?,
            }
        }
        Ok(())
    }

    /// The configuration as an `EnvFilter` directive string
    pub fn filter_directives(&self) -> String {
        std::iter::once(self.level.to_string())
            .chain(
                self.targets
                    .iter()
                    .map(|(target, level)| format!("{target}={level}")),
            )
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// `<cache dir>/chromaforge/chromaforge.log`, or a relative file when there is no cache dir
pub fn default_log_file() -> PathBuf {
    match dirs::cache_dir() {
        Some(cache) => cache.join("chromaforge").join("chromaforge.log"),
        None => PathBuf::from("chromaforge.log"),
    }
}
