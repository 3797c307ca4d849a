// ABOUTME: Picks the most prominent-yet-readable text color for a surface
// ABOUTME: Walks a fixed candidate order per role and falls back to primary, so it never fails

use chromaforge_color::ContrastEvaluator;
use chromaforge_logging::{debug, trace};
use chromaforge_tokens::TokenMeta;
use chromaforge_types::{Color, ContrastThresholds, SurfaceKind, TextRole, WcagLevel};

use crate::palette::{InterfacePalette, SurfaceColors};

/// Candidate order for `pick_accessible_text`
const ACCESSIBLE_ORDER: [TextRole; 4] = [
    TextRole::Primary,
    TextRole::Muted,
    TextRole::Subtle,
    TextRole::Inactive,
];

/// Outcome of a resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub role: TextRole,
    pub color: Color,
    /// Alpha-aware contrast against the surface background
    pub ratio: f64,
    /// False when no candidate qualified and primary was used anyway
    pub meets_threshold: bool,
}

/// Foreground selection with configurable default thresholds
#[derive(Debug, Clone, Default)]
pub struct ForegroundResolver {
    thresholds: ContrastThresholds,
}

impl ForegroundResolver {
    pub fn new(thresholds: ContrastThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ContrastThresholds {
        &self.thresholds
    }

    /// Roles tried, in order, for a preferred role
    pub fn candidates(preferred: TextRole) -> &'static [TextRole] {
        match preferred {
            TextRole::Primary => &[TextRole::Primary],
            TextRole::Muted => &[TextRole::Muted, TextRole::Primary],
            TextRole::Subtle => &[TextRole::Subtle, TextRole::Muted, TextRole::Primary],
            TextRole::Inactive => &[
                TextRole::Inactive,
                TextRole::Subtle,
                TextRole::Muted,
                TextRole::Primary,
            ],
        }
    }

    /// Resolve with the resolver's default thresholds
    pub fn resolve(&self, palette: &InterfacePalette, surface: SurfaceKind, preferred: TextRole) -> Color {
        self.resolve_detailed(palette, surface, preferred, &self.thresholds)
            .color
    }

    /// Resolve with thresholds supplied for this call only
    pub fn resolve_with(
        &self,
        palette: &InterfacePalette,
        surface: SurfaceKind,
        preferred: TextRole,
        thresholds: &ContrastThresholds,
    ) -> Color {
        self.resolve_detailed(palette, surface, preferred, thresholds)
            .color
    }

    pub fn resolve_detailed(
        &self,
        palette: &InterfacePalette,
        surface: SurfaceKind,
        preferred: TextRole,
        thresholds: &ContrastThresholds,
    ) -> Resolution {
        let resolution = Self::resolve_on(palette.surface(surface.base()), preferred, thresholds);
        if !resolution.meets_threshold {
            debug!(
                surface = %surface.as_str(),
                preferred = %preferred,
                ratio = resolution.ratio,
                "No candidate met its contrast threshold, using primary text"
            );
        }
        resolution
    }

    /// Resolve for a registered token; its contrast hints override the defaults
    pub fn resolve_for_token(
        &self,
        palette: &InterfacePalette,
        meta: &TokenMeta,
        preferred: TextRole,
    ) -> Resolution {
        let thresholds = self.thresholds.with_hints(&meta.contrast_hints);
        let resolution = self.resolve_detailed(palette, meta.surface, preferred, &thresholds);
        trace!(
            token = %meta.key,
            role = %resolution.role,
            ratio = resolution.ratio,
            "Resolved token foreground"
        );
        resolution
    }

    /// Core selection over one surface's colors
    pub fn resolve_on(
        surface: &SurfaceColors,
        preferred: TextRole,
        thresholds: &ContrastThresholds,
    ) -> Resolution {
        Self::first_readable(surface, Self::candidates(preferred), |role| {
            thresholds.for_role(role)
        })
    }

    /// First of primary, muted, subtle, inactive that reaches the WCAG target
    pub fn pick_accessible_text(
        &self,
        palette: &InterfacePalette,
        surface: SurfaceKind,
        level: WcagLevel,
    ) -> Color {
        Self::pick_accessible_on(palette.surface(surface.base()), level).color
    }

    pub fn pick_accessible_on(surface: &SurfaceColors, level: WcagLevel) -> Resolution {
        let target = level.target();
        Self::first_readable(surface, &ACCESSIBLE_ORDER, |_| target)
    }

    fn first_readable<F>(surface: &SurfaceColors, candidates: &[TextRole], threshold: F) -> Resolution
    where
        F: Fn(TextRole) -> f64,
    {
        let measure = |role: TextRole| {
            let color = surface.text.get(role);
            let ratio = ContrastEvaluator::contrast_ratio_aware(color, surface.background);
            (color, ratio)
        };

        for &role in candidates {
            let (color, ratio) = measure(role);
            if ContrastEvaluator::meets(ratio, threshold(role)) {
                return Resolution {
                    role,
                    color,
                    ratio,
                    meets_threshold: true,
                };
            }
        }

        let (color, ratio) = measure(TextRole::Primary);
        Resolution {
            role: TextRole::Primary,
            color,
            ratio,
            meets_threshold: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, TextColors};
    use chromaforge_color::ColorOperations;
    use chromaforge_types::{BaseSurface, ContrastHints};

    fn c(hex: &str) -> Color {
        Color::parse(hex).unwrap()
    }

    /// Primary measures about 12:1 and muted about 3.2:1 against the background
    fn fixture() -> SurfaceColors {
        SurfaceColors {
            background: c("#1e1e2e"),
            text: TextColors {
                primary: c("#dcdcdc"),
                muted: c("#6d6d75"),
                subtle: c("#45475a"),
                inactive: c("#313244"),
            },
        }
    }

    #[test]
    fn test_fixture_ratios() {
        let surface = fixture();
        let primary = ContrastEvaluator::contrast_ratio(surface.text.primary, surface.background);
        let muted = ContrastEvaluator::contrast_ratio(surface.text.muted, surface.background);
        assert!((primary - 12.0).abs() < 0.1, "primary = {primary}");
        assert!((muted - 3.2).abs() < 0.05, "muted = {muted}");
    }

    #[test]
    fn test_muted_wins_when_it_qualifies() {
        let thresholds = ContrastThresholds {
            muted_min: 3.0,
            ..Default::default()
        };
        let resolution = ForegroundResolver::resolve_on(&fixture(), TextRole::Muted, &thresholds);
        assert_eq!(resolution.role, TextRole::Muted);
        assert_eq!(resolution.color, c("#6d6d75"));
        assert!(resolution.meets_threshold);
    }

    #[test]
    fn test_stricter_threshold_falls_through_to_primary() {
        let thresholds = ContrastThresholds {
            muted_min: 3.5,
            ..Default::default()
        };
        let resolution = ForegroundResolver::resolve_on(&fixture(), TextRole::Muted, &thresholds);
        assert_eq!(resolution.role, TextRole::Primary);
        assert!(resolution.meets_threshold);
    }

    #[test]
    fn test_subtle_candidate_order() {
        // subtle (1.8:1) fails 2.5, muted (3.2:1) passes 3.0
        let resolution =
            ForegroundResolver::resolve_on(&fixture(), TextRole::Subtle, &ContrastThresholds::default());
        assert_eq!(resolution.role, TextRole::Muted);
        assert_eq!(
            ForegroundResolver::candidates(TextRole::Subtle),
            &[TextRole::Subtle, TextRole::Muted, TextRole::Primary]
        );
        assert_eq!(
            ForegroundResolver::candidates(TextRole::Muted),
            &[TextRole::Muted, TextRole::Primary]
        );
    }

    #[test]
    fn test_impossible_thresholds_fall_back_to_primary() {
        let impossible = ContrastThresholds {
            primary_min: 50.0,
            muted_min: 50.0,
            subtle_min: 50.0,
            inactive_min: 50.0,
        };
        let ops = ColorOperations::default();
        let ui = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();
        let resolver = ForegroundResolver::new(impossible);

        for surface in SurfaceKind::ALL {
            for role in TextRole::ALL {
                let resolution = resolver.resolve_detailed(&ui, surface, role, &impossible);
                assert_eq!(resolution.role, TextRole::Primary);
                assert_eq!(resolution.color, ui.base.text.primary);
                assert!(!resolution.meets_threshold);
                assert_eq!(resolver.resolve(&ui, surface, role), ui.base.text.primary);
            }
        }
    }

    #[test]
    fn test_surfaces_resolve_through_base_tier() {
        let mut ui = InterfacePalette::derive(&Palette::dark_default(), &ColorOperations::default()).unwrap();
        ui.elevated = fixture();
        let resolver = ForegroundResolver::default();

        for surface in [SurfaceKind::Panel, SurfaceKind::Menu, SurfaceKind::List] {
            assert_eq!(surface.base(), BaseSurface::Elevated);
            assert_eq!(resolver.resolve(&ui, surface, TextRole::Muted), c("#6d6d75"));
        }
    }

    #[test]
    fn test_per_call_thresholds_override_defaults() {
        let mut ui = InterfacePalette::derive(&Palette::dark_default(), &ColorOperations::default()).unwrap();
        ui.base = fixture();
        let resolver = ForegroundResolver::default();

        assert_eq!(resolver.resolve(&ui, SurfaceKind::Editor, TextRole::Muted), c("#6d6d75"));
        let strict = ContrastThresholds {
            muted_min: 4.5,
            ..Default::default()
        };
        assert_eq!(
            resolver.resolve_with(&ui, SurfaceKind::Editor, TextRole::Muted, &strict),
            c("#dcdcdc")
        );
    }

    #[test]
    fn test_token_hints_override_defaults() {
        let mut ui = InterfacePalette::derive(&Palette::dark_default(), &ColorOperations::default()).unwrap();
        ui.base = fixture();
        let resolver = ForegroundResolver::default();

        let relaxed = TokenMeta::new("statusBar.foreground").surface(SurfaceKind::StatusBar);
        assert_eq!(
            resolver.resolve_for_token(&ui, &relaxed, TextRole::Muted).role,
            TextRole::Muted
        );

        let strict = relaxed.clone().hints(ContrastHints {
            muted_min: Some(4.0),
            ..Default::default()
        });
        let resolution = resolver.resolve_for_token(&ui, &strict, TextRole::Muted);
        assert_eq!(resolution.role, TextRole::Primary);
        assert!(resolution.ratio > 11.0);
    }

    #[test]
    fn test_translucent_candidates_are_flattened() {
        let mut surface = fixture();
        // Pure white at ~27% alpha over #1e1e2e renders as #5b5b67
        surface.text.muted = c("#ffffff45");
        let flat = ContrastEvaluator::flatten(surface.text.muted, surface.background);
        assert_eq!(flat, c("#5b5b67"));

        // Opaque white would pass easily; rendered it is about 2.45:1 and misses 3.0
        let resolution = ForegroundResolver::resolve_on(&surface, TextRole::Muted, &ContrastThresholds::default());
        assert_eq!(resolution.role, TextRole::Primary);
        assert_eq!(resolution.color, c("#dcdcdc"));
        assert!(resolution.meets_threshold);
    }

    #[test]
    fn test_pick_accessible_text() {
        let surface = fixture();
        let aa = ForegroundResolver::pick_accessible_on(&surface, WcagLevel::AA);
        assert_eq!(aa.role, TextRole::Primary);

        let mut weak = surface;
        weak.text.primary = c("#45475a");
        let fallback = ForegroundResolver::pick_accessible_on(&weak, WcagLevel::AAA);
        assert_eq!(fallback.role, TextRole::Primary);
        assert!(!fallback.meets_threshold);

        let ui = InterfacePalette::derive(&Palette::dark_default(), &ColorOperations::default()).unwrap();
        let resolver = ForegroundResolver::default();
        let color = resolver.pick_accessible_text(&ui, SurfaceKind::QuickInput, WcagLevel::AAA);
        assert!(ContrastEvaluator::contrast_ratio(color, ui.overlay.background) >= 7.0);
    }
}
