// ABOUTME: Error types for token registry queries and table imports
// ABOUTME: Import failures are reported before any registry mutation takes place

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Alias cycle detected: {}", chain.join(" -> "))]
    AliasCycle { chain: Vec<String> },

    #[error("Token '{key}' is not registered")]
    UnknownToken { key: String },

    #[error("Invalid token search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to serialize token table: {0}")]
    Export(#[from] serde_json::Error),
}

impl RegistryError {
    /// Create an unknown token error
    pub fn unknown_token<S: Into<String>>(key: S) -> Self {
        Self::UnknownToken { key: key.into() }
    }
}

/// Reasons a token table payload is rejected as a whole
#[derive(Debug, Error)]
pub enum RegistryImportError {
    #[error("Malformed token table: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Token entry #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("Token '{key}' appears more than once in the payload")]
    DuplicateKey { key: String },

    #[error("Token '{key}' is declared as an alias of itself")]
    SelfAlias { key: String },

    #[error("Token '{key}' has invalid contrast hint {value} (must be finite and positive)")]
    InvalidHint { key: String, value: f64 },
}
