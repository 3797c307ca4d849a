// ABOUTME: Error types for palette loading and theme generation
// ABOUTME: Validation findings are reported, not raised; only malformed input fails

use chromaforge_tokens::RegistryImportError;
use chromaforge_types::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Palette is missing required color '{name}'")]
    MissingColor { name: String },

    #[error("Palette color '{name}' is invalid: {source}")]
    InvalidColor {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("Palette entry '{name}' must be a color string or a group of colors")]
    InvalidEntry { name: String },

    #[error("Malformed JSON palette: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML palette: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PaletteError {
    pub fn missing<S: Into<String>>(name: S) -> Self {
        Self::MissingColor { name: name.into() }
    }

    pub fn invalid_entry<S: Into<String>>(name: S) -> Self {
        Self::InvalidEntry { name: name.into() }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("Failed to load token table: {0}")]
    Registry(#[from] RegistryImportError),

    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },
}
