// ABOUTME: Engine configuration: color mode, cache sizing and contrast thresholds
// ABOUTME: Parsed from TOML with serde defaults, then validated before use

use anyhow::Context;
use chromaforge_color::DEFAULT_CACHE_CAPACITY;
use chromaforge_logging::{info, warn};
use chromaforge_types::{ColorMode, ContrastThresholds};
use serde::{Deserialize, Serialize};

/// Theme engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Color space for mix/lighten/darken
    #[serde(default)]
    pub color_mode: ColorMode,

    /// Maximum memoized color operations
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Memoize color operations at all
    #[serde(default = "default_true")]
    pub memoize: bool,

    /// Default minimum contrast per text role
    #[serde(default)]
    pub thresholds: ContrastThresholds,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            cache_capacity: default_cache_capacity(),
            memoize: true,
            thresholds: ContrastThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(document: &str) -> anyhow::Result<Self> {
        let config: EngineConfig =
            toml::from_str(document).context("Failed to parse engine configuration")?;

        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid engine configuration")?;

        info!(
            color_mode = %config.color_mode,
            cache_capacity = config.cache_capacity,
            memoize = config.memoize,
            "Loaded engine configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.thresholds.is_valid() {
            return Err(format!(
                "contrast thresholds must be finite ratios between 1 and 21, got {:?}",
                self.thresholds
            ));
        }

        if self.memoize && self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0 when memoize is enabled".to_string());
        }

        let t = &self.thresholds;
        if t.primary_min < t.muted_min || t.muted_min < t.subtle_min || t.subtle_min < t.inactive_min {
            warn!(
                thresholds = ?t,
                "Contrast thresholds are not ordered primary >= muted >= subtle >= inactive"
            );
        }

        Ok(())
    }

    /// Cache capacity actually handed to the color operations
    pub fn effective_cache_capacity(&self) -> usize {
        if self.memoize { self.cache_capacity } else { 0 }
    }
}
