// ABOUTME: Theme generation for chromaforge: palettes in, validated token maps out
// ABOUTME: Ties color operations, the token registry and foreground resolution into one engine

pub mod config;
pub mod engine;
pub mod error;
pub mod palette;
pub mod resolver;
pub mod theme;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, PaletteError, Result};
pub use palette::{InterfacePalette, Palette, Slot, SurfaceColors, TextColors};
pub use resolver::{ForegroundResolver, Resolution};
pub use theme::{GeneratedTheme, Rule, THEME_RULES, ThemeGenerator};

pub use chromaforge_color::{ColorOperations, ContrastEvaluator};
pub use chromaforge_tokens::{TokenMeta, TokenRegistry, ValidationReport};
pub use chromaforge_types::{
    AlphaPolicy, BaseSurface, Color, ColorMode, ContrastThresholds, SurfaceKind, TextRole, WcagLevel,
};

/// Generate a theme from a palette with the default configuration
///
/// Builds a throwaway engine, so repeated calls share no cache. Keep an
/// [`Engine`] around when generating more than once.
pub fn generate_theme(palette: &Palette, mode: ColorMode) -> Result<GeneratedTheme> {
    let config = EngineConfig {
        color_mode: mode,
        ..EngineConfig::default()
    };
    Engine::new(config)?.generate(palette)
}
