// ABOUTME: Cross-checks a generated token map against registry policies
// ABOUTME: Reports alpha violations, contrast shortfalls and coverage drift without ever failing

use std::collections::BTreeMap;
use std::fmt;

use chromaforge_color::ContrastEvaluator;
use chromaforge_logging::debug;
use chromaforge_types::{AlphaPolicy, ContrastThresholds};

use crate::registry::TokenRegistry;

/// A token whose emitted color disagrees with its declared alpha policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaPolicyViolation {
    pub key: String,
    pub value: String,
    pub policy: AlphaPolicy,
}

impl fmt::Display for AlphaPolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} violates alpha policy '{}'",
            self.key, self.value, self.policy
        )
    }
}

/// A measured contrast ratio below the token's requirement
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastWarning {
    pub key: String,
    pub background_key: String,
    pub ratio: f64,
    pub required: f64,
}

impl fmt::Display for ContrastWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} has contrast {:.2}:1, needs {:.2}:1",
            self.key, self.background_key, self.ratio, self.required
        )
    }
}

/// Drift between the registry and a theme
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Registered, non-deprecated tokens the theme does not define
    pub missing_from_theme: Vec<String>,
    /// Theme tokens the registry does not know
    pub unknown_to_registry: Vec<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing_from_theme.is_empty() && self.unknown_to_registry.is_empty()
    }
}

/// Combined result of validating a theme
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub violations: Vec<AlphaPolicyViolation>,
    pub contrast_warnings: Vec<ContrastWarning>,
    pub coverage: CoverageReport,
}

impl ValidationReport {
    /// Valid when no alpha policy is violated; warnings and drift are advisory
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Theme validation: {} | {} alpha violations, {} contrast warnings | {} missing, {} unknown",
            if self.is_valid() { "PASS" } else { "FAIL" },
            self.violations.len(),
            self.contrast_warnings.len(),
            self.coverage.missing_from_theme.len(),
            self.coverage.unknown_to_registry.len(),
        )
    }
}

impl TokenRegistry {
    /// Alpha policy check for every registered token present in `colors`
    pub fn validate_all_tokens(&self, colors: &BTreeMap<String, String>) -> Vec<AlphaPolicyViolation> {
        colors
            .iter()
            .filter_map(|(key, value)| {
                let meta = self.get(key)?;
                (!Self::validate_token_alpha(key, value, meta.alpha_policy)).then(|| {
                    AlphaPolicyViolation {
                        key: key.clone(),
                        value: value.clone(),
                        policy: meta.alpha_policy,
                    }
                })
            })
            .collect()
    }

    pub fn check_coverage(&self, colors: &BTreeMap<String, String>) -> CoverageReport {
        let missing_from_theme = self
            .iter()
            .filter(|meta| !meta.deprecated && !colors.contains_key(&meta.key))
            .map(|meta| meta.key.clone())
            .collect();

        let unknown_to_registry = colors
            .keys()
            .filter(|key| !self.contains(key))
            .cloned()
            .collect();

        CoverageReport {
            missing_from_theme,
            unknown_to_registry,
        }
    }

    /// Measure every token that names a background.
    ///
    /// The requirement is the token's strongest hint, or the primary
    /// threshold when it declares none. Tokens whose color or background is
    /// missing or malformed are skipped.
    pub fn audit_contrast(
        &self,
        colors: &BTreeMap<String, String>,
        thresholds: &ContrastThresholds,
    ) -> Vec<ContrastWarning> {
        let mut warnings = Vec::new();

        for meta in self.iter() {
            let Some(background_key) = meta.background_key.as_deref() else {
                continue;
            };
            let (Some(fg), Some(bg)) = (colors.get(&meta.key), colors.get(background_key)) else {
                continue;
            };
            let Some(ratio) = ContrastEvaluator::contrast_ratio_aware_str(fg, bg) else {
                debug!(token = %meta.key, "Skipping contrast check for malformed color");
                continue;
            };

            let required = meta
                .contrast_hints
                .required()
                .unwrap_or(thresholds.primary_min);
            if !ContrastEvaluator::meets(ratio, required) {
                warnings.push(ContrastWarning {
                    key: meta.key.clone(),
                    background_key: background_key.to_string(),
                    ratio,
                    required,
                });
            }
        }

        warnings
    }

    /// Alpha, contrast and coverage checks with default thresholds
    pub fn validate_theme(&self, colors: &BTreeMap<String, String>) -> ValidationReport {
        self.validate_theme_with(colors, &ContrastThresholds::default())
    }

    pub fn validate_theme_with(
        &self,
        colors: &BTreeMap<String, String>,
        thresholds: &ContrastThresholds,
    ) -> ValidationReport {
        ValidationReport {
            violations: self.validate_all_tokens(colors),
            contrast_warnings: self.audit_contrast(colors, thresholds),
            coverage: self.check_coverage(colors),
        }
    }
}

