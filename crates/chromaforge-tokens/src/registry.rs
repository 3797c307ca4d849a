// ABOUTME: Declarative table of per-token policies: surface, alpha policy, contrast hints, aliases
// ABOUTME: Loaded from an embedded JSON asset through the same transactional import path as user tables

use std::collections::{BTreeMap, BTreeSet};

use chromaforge_logging::{debug, info, trace, warn};
use chromaforge_types::{AlphaPolicy, BaseSurface, Color, ContrastHints, SurfaceKind};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryImportError, Result};

/// Built-in token table
const DEFAULT_TOKENS: &str = include_str!("../assets/tokens.json");

fn is_default_surface(surface: &SurfaceKind) -> bool {
    *surface == SurfaceKind::default()
}

fn is_default_alpha(policy: &AlphaPolicy) -> bool {
    *policy == AlphaPolicy::default()
}

/// Policy metadata for one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenMeta {
    pub key: String,

    #[serde(default, skip_serializing_if = "is_default_surface")]
    pub surface: SurfaceKind,

    #[serde(rename = "alpha", default, skip_serializing_if = "is_default_alpha")]
    pub alpha_policy: AlphaPolicy,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,

    #[serde(default, skip_serializing_if = "ContrastHints::is_empty")]
    pub contrast_hints: ContrastHints,

    /// Token whose color this token's color is drawn on
    #[serde(rename = "bgKey", default, skip_serializing_if = "Option::is_none")]
    pub background_key: Option<String>,
}

impl TokenMeta {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            surface: SurfaceKind::default(),
            alpha_policy: AlphaPolicy::default(),
            deprecated: false,
            alias_of: None,
            contrast_hints: ContrastHints::default(),
            background_key: None,
        }
    }

    pub fn surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = surface;
        self
    }

    pub fn alpha(mut self, policy: AlphaPolicy) -> Self {
        self.alpha_policy = policy;
        self
    }

    /// Mark as deprecated in favour of `target`
    pub fn deprecated_alias_of(mut self, target: impl Into<String>) -> Self {
        self.deprecated = true;
        self.alias_of = Some(target.into());
        self
    }

    pub fn alias_of(mut self, target: impl Into<String>) -> Self {
        self.alias_of = Some(target.into());
        self
    }

    pub fn hints(mut self, hints: ContrastHints) -> Self {
        self.contrast_hints = hints;
        self
    }

    pub fn background(mut self, key: impl Into<String>) -> Self {
        self.background_key = Some(key.into());
        self
    }

    pub fn base_surface(&self) -> BaseSurface {
        self.surface.base()
    }

    fn check(&self, index: usize) -> std::result::Result<(), RegistryImportError> {
        if self.key.trim().is_empty() {
            return Err(RegistryImportError::EmptyKey { index });
        }
        if self.alias_of.as_deref() == Some(self.key.as_str()) {
            return Err(RegistryImportError::SelfAlias {
                key: self.key.clone(),
            });
        }
        if let Some(value) = self
            .contrast_hints
            .values()
            .find(|v| !v.is_finite() || *v <= 0.0)
        {
            return Err(RegistryImportError::InvalidHint {
                key: self.key.clone(),
                value,
            });
        }
        Ok(())
    }
}

/// Queryable token policy table
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: BTreeMap<String, TokenMeta>,
}

impl TokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated from the built-in token table
    pub fn with_defaults() -> std::result::Result<Self, RegistryImportError> {
        let mut registry = Self::new();
        let count = registry.import_json(DEFAULT_TOKENS)?;
        debug!(token_count = count, "Loaded built-in token table");
        Ok(registry)
    }

    /// Insert or replace a token, returning the previous entry
    pub fn add(&mut self, meta: TokenMeta) -> Option<TokenMeta> {
        let previous = self.tokens.insert(meta.key.clone(), meta);
        if let Some(previous) = &previous {
            debug!(token = %previous.key, "Replaced token metadata");
        }
        previous
    }

    pub fn remove(&mut self, key: &str) -> Result<TokenMeta> {
        self.tokens
            .remove(key)
            .ok_or_else(|| RegistryError::unknown_token(key))
    }

    pub fn get(&self, key: &str) -> Option<&TokenMeta> {
        self.tokens.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tokens.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenMeta> {
        self.tokens.values()
    }

    /// Check a color string against an alpha policy.
    ///
    /// Opaque accepts `#rrggbb` and `#rrggbbff`, Transparent accepts
    /// `#rrggbbaa` with `aa != ff`, Either accepts both. Anything that is not
    /// well-formed hex with a leading `#` fails every policy.
    pub fn validate_token_alpha(key: &str, value: &str, policy: AlphaPolicy) -> bool {
        let color = match Color::parse(value) {
            Ok(color) if value.starts_with('#') => color,
            _ => {
                trace!(token = key, value, "Malformed color fails alpha policy");
                return false;
            }
        };

        match policy {
            AlphaPolicy::Opaque => color.is_opaque(),
            AlphaPolicy::Transparent => color.has_alpha() && !color.is_opaque(),
            AlphaPolicy::Either => true,
        }
    }

    /// Single-hop alias lookup
    pub fn resolve_alias_once(&self, key: &str) -> Option<&str> {
        self.tokens.get(key).and_then(|meta| meta.alias_of.as_deref())
    }

    /// Follow `aliasOf` links to the final key.
    ///
    /// A key without an alias resolves to itself. A link to an unregistered
    /// key ends the chain at that key.
    pub fn resolve_alias(&self, key: &str) -> Result<String> {
        if !self.contains(key) {
            return Err(RegistryError::unknown_token(key));
        }

        let mut chain = vec![key.to_string()];
        let mut visited = BTreeSet::from([key]);
        let mut current = key;

        while let Some(next) = self.resolve_alias_once(current) {
            chain.push(next.to_string());
            if !visited.insert(next) {
                warn!(chain = %chain.join(" -> "), "Token alias cycle");
                return Err(RegistryError::AliasCycle { chain });
            }
            current = next;
        }

        Ok(current.to_string())
    }

    pub fn tokens_by_surface(&self, surface: SurfaceKind) -> Vec<&TokenMeta> {
        self.iter().filter(|meta| meta.surface == surface).collect()
    }

    /// Tokens whose surface resolves to the given base tier
    pub fn tokens_by_base_surface(&self, base: BaseSurface) -> Vec<&TokenMeta> {
        self.iter().filter(|meta| meta.base_surface() == base).collect()
    }

    pub fn tokens_by_alpha_policy(&self, policy: AlphaPolicy) -> Vec<&TokenMeta> {
        self.iter().filter(|meta| meta.alpha_policy == policy).collect()
    }

    pub fn deprecated_tokens(&self) -> Vec<&TokenMeta> {
        self.iter().filter(|meta| meta.deprecated).collect()
    }

    /// Tokens whose key matches a regular expression
    pub fn search(&self, pattern: &str) -> Result<Vec<&TokenMeta>> {
        let regex = Regex::new(pattern)?;
        Ok(self.iter().filter(|meta| regex.is_match(&meta.key)).collect())
    }

    /// Upsert every entry of a JSON array payload.
    ///
    /// The payload is parsed and checked in full before the registry is
    /// touched; on error nothing changes. Returns the number of entries.
    pub fn import_json(&mut self, payload: &str) -> std::result::Result<usize, RegistryImportError> {
        let entries: Vec<TokenMeta> = serde_json::from_str(payload)?;

        let mut seen = BTreeSet::new();
        for (index, meta) in entries.iter().enumerate() {
            meta.check(index)?;
            if !seen.insert(meta.key.as_str()) {
                return Err(RegistryImportError::DuplicateKey {
                    key: meta.key.clone(),
                });
            }
        }

        let count = entries.len();
        let replaced = entries
            .into_iter()
            .filter_map(|meta| self.tokens.insert(meta.key.clone(), meta))
            .count();

        info!(
            imported = count,
            replaced,
            total = self.tokens.len(),
            "Imported token table"
        );
        Ok(count)
    }

    /// Serialize as a JSON array sorted by key, omitting default fields
    pub fn export_json(&self) -> Result<String> {
        let entries: Vec<&TokenMeta> = self.tokens.values().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }
}
