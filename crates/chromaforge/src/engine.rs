// ABOUTME: Theme engine owning the color operations, token registry and resolver
// ABOUTME: Generation derives the interface palette, applies theme rules and validates the result

use std::time::Duration;

use chromaforge_color::{CacheMetrics, ColorOperations};
use chromaforge_logging::{OperationStats, PerfStats, PerfTimer, debug, info, warn};
use chromaforge_tokens::TokenRegistry;
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::palette::{InterfacePalette, Palette};
use crate::resolver::ForegroundResolver;
use crate::theme::{GeneratedTheme, THEME_RULES, ThemeGenerator};

const GENERATE_OPERATION: &str = "generate_theme";
const SLOW_GENERATION: Duration = Duration::from_millis(50);

pub struct Engine {
    config: EngineConfig,
    ops: ColorOperations,
    registry: TokenRegistry,
    resolver: ForegroundResolver,
    stats: Mutex<PerfStats>,
}

impl Engine {
    /// Engine with the built-in token table
    pub fn new(config: EngineConfig) -> Result<Self> {
        let registry = TokenRegistry::with_defaults()?;
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: EngineConfig, registry: TokenRegistry) -> Result<Self> {
        config
            .validate()
            .map_err(|reason| EngineError::InvalidConfig { reason })?;

        let ops = ColorOperations::with_cache_capacity(
            config.color_mode,
            config.effective_cache_capacity(),
        );
        let resolver = ForegroundResolver::new(config.thresholds);

        debug!(
            color_mode = %config.color_mode,
            cache_capacity = config.effective_cache_capacity(),
            tokens = registry.len(),
            "Created theme engine"
        );

        Ok(Self {
            config,
            ops,
            registry,
            resolver,
            stats: Mutex::new(PerfStats::new()),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn operations(&self) -> &ColorOperations {
        &self.ops
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TokenRegistry {
        &mut self.registry
    }

    pub fn resolver(&self) -> &ForegroundResolver {
        &self.resolver
    }

    pub fn cache_stats(&self) -> CacheMetrics {
        self.ops.cache_stats()
    }

    /// Timing totals over every `generate` call since the last reset
    pub fn generation_stats(&self) -> Option<OperationStats> {
        self.stats.lock().get(GENERATE_OPERATION)
    }

    /// Drop memoized colors and timing history
    pub fn reset(&self) {
        self.ops.clear_cache();
        self.stats.lock().clear();
        debug!("Theme engine reset");
    }

    pub fn derive_palette(&self, palette: &Palette) -> Result<InterfacePalette> {
        Ok(InterfacePalette::derive(palette, &self.ops)?)
    }

    /// Build the full token map for a palette.
    ///
    /// Alpha violations and contrast shortfalls land in the report and are
    /// logged; only a malformed palette makes this fail.
    pub fn generate(&self, palette: &Palette) -> Result<GeneratedTheme> {
        let timer = PerfTimer::new(GENERATE_OPERATION).with_warn_threshold(SLOW_GENERATION);

        let interface = self.derive_palette(palette)?;
        let tokens = ThemeGenerator::new(&interface, &self.ops, &self.registry, &self.resolver)
            .build(THEME_RULES);
        let report = self
            .registry
            .validate_theme_with(&tokens, &self.config.thresholds);

        for violation in &report.violations {
            warn!(
                token = %violation.key,
                value = %violation.value,
                policy = %violation.policy,
                "Alpha policy violation"
            );
        }
        for warning in &report.contrast_warnings {
            warn!(
                token = %warning.key,
                background = %warning.background_key,
                ratio = warning.ratio,
                required = warning.required,
                "Insufficient contrast"
            );
        }
        if !report.coverage.is_complete() {
            debug!(
                missing = report.coverage.missing_from_theme.len(),
                unknown = report.coverage.unknown_to_registry.len(),
                "Theme coverage differs from registry"
            );
        }

        let cache = self.ops.cache_stats();
        info!(
            dark = interface.dark,
            tokens = tokens.len(),
            cache_hits = cache.hits,
            cache_misses = cache.misses,
            "{}",
            report.summary()
        );

        self.stats
            .lock()
            .record(GENERATE_OPERATION, timer.elapsed());

        Ok(GeneratedTheme {
            dark: interface.dark,
            tokens,
            report,
        })
    }
}
