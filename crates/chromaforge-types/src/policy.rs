// ABOUTME: Per-token policy types: alpha policy, text roles and contrast thresholds
// ABOUTME: Defaults follow WCAG 2.1 ratios for normal, large and incidental text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a token's color may carry transparency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlphaPolicy {
    /// `#rrggbb` or `#rrggbbff`
    Opaque,
    /// `#rrggbbaa` with `aa != ff`
    Transparent,
    #[default]
    Either,
}

impl fmt::Display for AlphaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlphaPolicy::Opaque => "opaque",
            AlphaPolicy::Transparent => "transparent",
            AlphaPolicy::Either => "either",
        })
    }
}

/// Prominence of a text color, from most to least readable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Primary,
    Muted,
    Subtle,
    Inactive,
}

impl TextRole {
    pub const ALL: [TextRole; 4] = [
        TextRole::Primary,
        TextRole::Muted,
        TextRole::Subtle,
        TextRole::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextRole::Primary => "primary",
            TextRole::Muted => "muted",
            TextRole::Subtle => "subtle",
            TextRole::Inactive => "inactive",
        }
    }
}

impl fmt::Display for TextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum contrast ratio per text role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastThresholds {
    pub primary_min: f64,
    pub muted_min: f64,
    pub subtle_min: f64,
    pub inactive_min: f64,
}

impl Default for ContrastThresholds {
    fn default() -> Self {
        Self {
            primary_min: 4.5,
            muted_min: 3.0,
            subtle_min: 2.5,
            inactive_min: 2.0,
        }
    }
}

impl ContrastThresholds {
    /// Threshold for one role
    pub fn for_role(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Primary => self.primary_min,
            TextRole::Muted => self.muted_min,
            TextRole::Subtle => self.subtle_min,
            TextRole::Inactive => self.inactive_min,
        }
    }

    /// Copy with any hints present in `hints` taking precedence
    pub fn with_hints(&self, hints: &ContrastHints) -> Self {
        Self {
            primary_min: hints.primary_min.unwrap_or(self.primary_min),
            muted_min: hints.muted_min.unwrap_or(self.muted_min),
            subtle_min: hints.subtle_min.unwrap_or(self.subtle_min),
            inactive_min: self.inactive_min,
        }
    }

    /// Every ratio must be finite and inside the WCAG range [1, 21]
    pub fn is_valid(&self) -> bool {
        [
            self.primary_min,
            self.muted_min,
            self.subtle_min,
            self.inactive_min,
        ]
        .iter()
        .all(|v| v.is_finite() && (1.0..=21.0).contains(v))
    }
}

/// Optional per-token overrides of the role thresholds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtle_min: Option<f64>,
}

impl ContrastHints {
    pub fn is_empty(&self) -> bool {
        self.primary_min.is_none() && self.muted_min.is_none() && self.subtle_min.is_none()
    }

    /// The strongest declared requirement: primary, then muted, then subtle
    pub fn required(&self) -> Option<f64> {
        self.primary_min.or(self.muted_min).or(self.subtle_min)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> {
        [self.primary_min, self.muted_min, self.subtle_min]
            .into_iter()
            .flatten()
    }
}

/// WCAG conformance levels for normal-size text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WcagLevel {
    AA,
    AAA,
}

impl WcagLevel {
    pub fn target(&self) -> f64 {
        match self {
            WcagLevel::AA => 4.5,
            WcagLevel::AAA => 7.0,
        }
    }
}

/// Color space used by mix/lighten/darken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Srgb,
    Perceptual,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Srgb => "srgb",
            ColorMode::Perceptual => "perceptual",
        })
    }
}
