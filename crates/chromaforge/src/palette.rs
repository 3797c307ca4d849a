// ABOUTME: Base palettes and the interface palette derived from them
// ABOUTME: Nested palette documents flatten to dotted names; derivation runs through ColorOperations

use std::collections::BTreeMap;

use chromaforge_color::{ColorOperations, ContrastEvaluator};
use chromaforge_logging::debug;
use chromaforge_types::{BaseSurface, Color, TextRole};

use crate::error::PaletteError;

/// Names every palette must define
pub const REQUIRED_COLORS: [&str; 3] = ["bg.base", "text.primary", "accent"];

/// Names that override a derived slot when present
pub const OPTIONAL_COLORS: [&str; 14] = [
    "bg.elevated",
    "bg.overlay",
    "text.muted",
    "text.subtle",
    "text.inactive",
    "border",
    "border.focus",
    "button.background",
    "button.foreground",
    "badge.background",
    "red",
    "yellow",
    "green",
    "blue",
];

const DARK_DEFAULT: [(&str, Color); 7] = [
    ("bg.base", Color::rgb(0x1e, 0x1e, 0x2e)),
    ("text.primary", Color::rgb(0xcd, 0xd6, 0xf4)),
    ("accent", Color::rgb(0x89, 0xb4, 0xfa)),
    ("red", Color::rgb(0xf3, 0x8b, 0xa8)),
    ("yellow", Color::rgb(0xf9, 0xe2, 0xaf)),
    ("green", Color::rgb(0xa6, 0xe3, 0xa1)),
    ("blue", Color::rgb(0x89, 0xb4, 0xfa)),
];

const LIGHT_DEFAULT: [(&str, Color); 7] = [
    ("bg.base", Color::rgb(0xef, 0xf1, 0xf5)),
    ("text.primary", Color::rgb(0x4c, 0x4f, 0x69)),
    ("accent", Color::rgb(0x1e, 0x66, 0xf5)),
    ("red", Color::rgb(0xd2, 0x0f, 0x39)),
    ("yellow", Color::rgb(0xdf, 0x8e, 0x1d)),
    ("green", Color::rgb(0x40, 0xa0, 0x2b)),
    ("blue", Color::rgb(0x1e, 0x66, 0xf5)),
];

/// Flat map of named base colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    /// Build from name/color pairs, checking the required names
    pub fn from_colors<I, K>(colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (K, Color)>,
        K: Into<String>,
    {
        let palette = Self {
            colors: colors.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        };
        palette.check_required()?;
        Ok(palette)
    }

    /// Parse a nested JSON document such as `{"bg": {"base": "#1e1e2e"}}`
    pub fn from_json_str(document: &str) -> Result<Self, PaletteError> {
        let value: serde_json::Value = serde_json::from_str(document)?;
        let mut colors = BTreeMap::new();
        flatten_json("", &value, &mut colors)?;
        Self::from_colors(colors)
    }

    /// Parse a nested TOML document such as `[bg]\nbase = "#1e1e2e"`
    pub fn from_toml_str(document: &str) -> Result<Self, PaletteError> {
        let table: toml::Table = toml::from_str(document)?;
        let mut colors = BTreeMap::new();
        for (name, value) in &table {
            flatten_toml(name, value, &mut colors)?;
        }
        Self::from_colors(colors)
    }

    pub fn dark_default() -> Self {
        Self::from_static(&DARK_DEFAULT)
    }

    pub fn light_default() -> Self {
        Self::from_static(&LIGHT_DEFAULT)
    }

    fn from_static(entries: &[(&str, Color)]) -> Self {
        Self {
            colors: entries
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
        }
    }

    fn check_required(&self) -> Result<(), PaletteError> {
        match REQUIRED_COLORS.iter().find(|name| !self.colors.contains_key(**name)) {
            Some(name) => Err(PaletteError::missing(*name)),
            None => Ok(()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<Color, PaletteError> {
        self.get(name).ok_or_else(|| PaletteError::missing(name))
    }

    pub fn set(&mut self, name: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(name.into(), color)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Dark when the base background's relative luminance is below 0.5
    pub fn is_dark(&self) -> Result<bool, PaletteError> {
        let base = self.require("bg.base")?;
        Ok(ContrastEvaluator::relative_luminance(base) < 0.5)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn parse_named(name: &str, value: &str) -> Result<Color, PaletteError> {
    Color::parse(value).map_err(|source| PaletteError::InvalidColor {
        name: name.to_string(),
        source,
    })
}

fn flatten_json(
    prefix: &str,
    value: &serde_json::Value,
    out: &mut BTreeMap<String, Color>,
) -> Result<(), PaletteError> {
    match value {
        serde_json::Value::Object(group) => {
            for (name, value) in group {
                flatten_json(&join(prefix, name), value, out)?;
            }
            Ok(())
        }
        serde_json::Value::String(hex) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), parse_named(prefix, hex)?);
            Ok(())
        }
        _ if prefix.is_empty() => Err(PaletteError::invalid_entry("<root>")),
        _ => Err(PaletteError::invalid_entry(prefix)),
    }
}

fn flatten_toml(
    prefix: &str,
    value: &toml::Value,
    out: &mut BTreeMap<String, Color>,
) -> Result<(), PaletteError> {
    match value {
        toml::Value::Table(group) => {
            for (name, value) in group {
                flatten_toml(&join(prefix, name), value, out)?;
            }
            Ok(())
        }
        toml::Value::String(hex) => {
            out.insert(prefix.to_string(), parse_named(prefix, hex)?);
            Ok(())
        }
        _ => Err(PaletteError::invalid_entry(prefix)),
    }
}

/// Text colors for one surface, most to least prominent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    pub primary: Color,
    pub muted: Color,
    pub subtle: Color,
    pub inactive: Color,
}

impl TextColors {
    pub fn get(&self, role: TextRole) -> Color {
        match role {
            TextRole::Primary => self.primary,
            TextRole::Muted => self.muted,
            TextRole::Subtle => self.subtle,
            TextRole::Inactive => self.inactive,
        }
    }
}

/// A base surface's background with the text drawn on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceColors {
    pub background: Color,
    pub text: TextColors,
}

/// Interaction state colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateColors {
    pub hover: Color,
    pub active: Color,
    pub selection: Color,
    pub line_highlight: Color,
    pub focus_border: Color,
    pub border: Color,
    pub shadow: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub background: Color,
    pub foreground: Color,
    pub hover_background: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownColors {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub background: Color,
    pub foreground: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColors {
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub success: Color,
}

/// A named color in the interface palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Background(BaseSurface),
    Text(BaseSurface, TextRole),
    Accent,
    Hover,
    Active,
    Selection,
    LineHighlight,
    FocusBorder,
    Border,
    Shadow,
    ButtonBackground,
    ButtonForeground,
    ButtonHover,
    DropdownBackground,
    DropdownForeground,
    DropdownBorder,
    BadgeBackground,
    BadgeForeground,
    Error,
    Warning,
    Info,
    Success,
}

/// Every color the theme rules draw from, derived from a base palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfacePalette {
    pub dark: bool,
    pub accent: Color,
    pub base: SurfaceColors,
    pub elevated: SurfaceColors,
    pub overlay: SurfaceColors,
    pub state: StateColors,
    pub button: ButtonColors,
    pub dropdown: DropdownColors,
    pub badge: BadgeColors,
    pub status: StatusColors,
}

/// White or black, whichever reads better on `background`
fn on_color(background: Color) -> Color {
    let white = ContrastEvaluator::contrast_ratio(Color::WHITE, background);
    let black = ContrastEvaluator::contrast_ratio(Color::BLACK, background);
    if white >= black { Color::WHITE } else { Color::BLACK }
}

impl InterfacePalette {
    pub fn derive(palette: &Palette, ops: &ColorOperations) -> Result<Self, PaletteError> {
        let base_bg = palette.require("bg.base")?;
        let primary = palette.require("text.primary")?;
        let accent = palette.require("accent")?;
        let dark = palette.is_dark()?;

        // Raised surfaces move toward the text color, which works for both
        // light and dark bases
        let elevated_bg = palette
            .get("bg.elevated")
            .unwrap_or_else(|| ops.mix(base_bg, primary, 0.06));
        let overlay_bg = palette
            .get("bg.overlay")
            .unwrap_or_else(|| ops.mix(base_bg, primary, 0.1));

        let surface = |background: Color| SurfaceColors {
            background,
            text: TextColors {
                primary,
                muted: palette
                    .get("text.muted")
                    .unwrap_or_else(|| ops.mix(primary, background, 0.3)),
                subtle: palette
                    .get("text.subtle")
                    .unwrap_or_else(|| ops.mix(primary, background, 0.5)),
                inactive: palette
                    .get("text.inactive")
                    .unwrap_or_else(|| ops.mix(primary, background, 0.65)),
            },
        };

        let border = palette
            .get("border")
            .unwrap_or_else(|| ops.mix(base_bg, primary, 0.15));

        let state = StateColors {
            hover: ops.with_alpha(primary, if dark { 0.08 } else { 0.06 }),
            active: ops.with_alpha(primary, 0.12),
            selection: ops.with_alpha(accent, 0.25),
            line_highlight: ops.with_alpha(primary, 0.05),
            focus_border: palette.get("border.focus").unwrap_or(accent),
            border,
            shadow: ops.with_alpha(Color::BLACK, if dark { 0.5 } else { 0.2 }),
        };

        let button_bg = palette.get("button.background").unwrap_or(accent);
        let button = ButtonColors {
            background: button_bg,
            foreground: palette
                .get("button.foreground")
                .unwrap_or_else(|| on_color(button_bg)),
            hover_background: if dark {
                ops.lighten(button_bg, 0.1)
            } else {
                ops.darken(button_bg, 0.1)
            },
        };

        let badge_bg = palette.get("badge.background").unwrap_or(accent);
        let defaults = Palette::from_static(if dark { &DARK_DEFAULT } else { &LIGHT_DEFAULT });
        let status_color = |name: &str| palette.get(name).or_else(|| defaults.get(name));
        let status = StatusColors {
            error: status_color("red").unwrap_or(accent),
            warning: status_color("yellow").unwrap_or(accent),
            info: status_color("blue").unwrap_or(accent),
            success: status_color("green").unwrap_or(accent),
        };

        let interface = Self {
            dark,
            accent,
            base: surface(base_bg),
            elevated: surface(elevated_bg),
            overlay: surface(overlay_bg),
            state,
            button,
            dropdown: DropdownColors {
                background: elevated_bg,
                foreground: primary,
                border,
            },
            badge: BadgeColors {
                background: badge_bg,
                foreground: on_color(badge_bg),
            },
            status,
        };

        debug!(
            dark,
            base = %base_bg,
            elevated = %elevated_bg,
            overlay = %overlay_bg,
            mode = %ops.mode(),
            "Derived interface palette"
        );

        Ok(interface)
    }

    pub fn surface(&self, base: BaseSurface) -> &SurfaceColors {
        match base {
            BaseSurface::Base => &self.base,
            BaseSurface::Elevated => &self.elevated,
            BaseSurface::Overlay => &self.overlay,
        }
    }

    pub fn background(&self, base: BaseSurface) -> Color {
        self.surface(base).background
    }

    pub fn slot(&self, slot: Slot) -> Color {
        match slot {
            Slot::Background(base) => self.background(base),
            Slot::Text(base, role) => self.surface(base).text.get(role),
            Slot::Accent => self.accent,
            Slot::Hover => self.state.hover,
            Slot::Active => self.state.active,
            Slot::Selection => self.state.selection,
            Slot::LineHighlight => self.state.line_highlight,
            Slot::FocusBorder => self.state.focus_border,
            Slot::Border => self.state.border,
            Slot::Shadow => self.state.shadow,
            Slot::ButtonBackground => self.button.background,
            Slot::ButtonForeground => self.button.foreground,
            Slot::ButtonHover => self.button.hover_background,
            Slot::DropdownBackground => self.dropdown.background,
            Slot::DropdownForeground => self.dropdown.foreground,
            Slot::DropdownBorder => self.dropdown.border,
            Slot::BadgeBackground => self.badge.background,
            Slot::BadgeForeground => self.badge.foreground,
            Slot::Error => self.status.error,
            Slot::Warning => self.status.warning,
            Slot::Info => self.status.info,
            Slot::Success => self.status.success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaforge_types::ColorMode;

    #[test]
    fn test_json_groups_flatten_to_dotted_names() {
        let palette = Palette::from_json_str(
            r##"{
                "bg": { "base": "#1E1E2E", "elevated": "#181825" },
                "text": { "primary": "#cdd6f4" },
                "accent": "#89b4fa"
            }"##,
        )
        .unwrap();

        assert_eq!(palette.len(), 4);
        assert_eq!(palette.get("bg.base").unwrap().to_string(), "#1e1e2e");
        assert_eq!(palette.get("bg.elevated").unwrap().to_string(), "#181825");
        let names: Vec<_> = palette.names().collect();
        assert_eq!(names, vec!["accent", "bg.base", "bg.elevated", "text.primary"]);
    }

    #[test]
    fn test_toml_groups_flatten_to_dotted_names() {
        let palette = Palette::from_toml_str(
            r##"
                accent = "#1e66f5"
                red = "#d20f39"

                [bg]
                base = "#eff1f5"

                [text]
                primary = "#4c4f69"
                muted = "#6c6f85"
            "##,
        )
        .unwrap();

        assert_eq!(palette.get("text.muted").unwrap().to_string(), "#6c6f85");
        assert_eq!(palette.get("red").unwrap().to_string(), "#d20f39");
        assert!(!palette.is_dark().unwrap());
    }

    #[test]
    fn test_palette_errors() {
        let missing = Palette::from_json_str(r##"{ "bg": { "base": "#000000" }, "accent": "#ffffff" }"##);
        assert!(matches!(missing, Err(PaletteError::MissingColor { name }) if name == "text.primary"));

        let bad_color = Palette::from_json_str(r##"{ "bg": { "base": "#00000" } }"##);
        assert!(matches!(bad_color, Err(PaletteError::InvalidColor { name, .. }) if name == "bg.base"));

        let bad_entry = Palette::from_json_str(r#"{ "bg": { "base": 12 } }"#);
        assert!(matches!(bad_entry, Err(PaletteError::InvalidEntry { name }) if name == "bg.base"));

        assert!(matches!(
            Palette::from_json_str(r##"["#000000"]"##),
            Err(PaletteError::InvalidEntry { .. })
        ));
        assert!(matches!(Palette::from_json_str("{"), Err(PaletteError::Json(_))));
        assert!(matches!(Palette::from_toml_str("bg = ["), Err(PaletteError::Toml(_))));
        assert!(matches!(
            Palette::from_toml_str("accent = true"),
            Err(PaletteError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_builtin_palettes() {
        assert!(Palette::dark_default().is_dark().unwrap());
        assert!(!Palette::light_default().is_dark().unwrap());
        for name in REQUIRED_COLORS {
            assert!(Palette::dark_default().get(name).is_some());
            assert!(Palette::light_default().get(name).is_some());
        }
    }

    #[test]
    fn test_derive_dark_palette() {
        let ops = ColorOperations::new(ColorMode::Srgb);
        let ui = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();

        assert!(ui.dark);
        assert_eq!(ui.base.background.to_string(), "#1e1e2e");
        assert_eq!(ui.base.text.primary.to_string(), "#cdd6f4");
        assert_eq!(ui.button.foreground, Color::BLACK);
        assert_eq!(ui.status.error.to_string(), "#f38ba8");

        // Raised surfaces step toward the text color
        let base = ContrastEvaluator::relative_luminance(ui.base.background);
        let elevated = ContrastEvaluator::relative_luminance(ui.elevated.background);
        let overlay = ContrastEvaluator::relative_luminance(ui.overlay.background);
        assert!(base < elevated && elevated < overlay);

        // Text roles lose contrast in order on every surface
        for base in BaseSurface::ALL {
            let surface = ui.surface(base);
            let ratios: Vec<f64> = TextRole::ALL
                .iter()
                .map(|role| ContrastEvaluator::contrast_ratio(surface.text.get(*role), surface.background))
                .collect();
            assert!(ratios.windows(2).all(|w| w[0] > w[1]), "{base}: {ratios:?}");
        }

        assert!(!ui.state.selection.is_opaque());
        assert!(!ui.state.shadow.is_opaque());
        assert_eq!(ui.slot(Slot::Text(BaseSurface::Overlay, TextRole::Primary)), ui.base.text.primary);
        assert_eq!(ui.slot(Slot::DropdownBackground), ui.elevated.background);
    }

    #[test]
    fn test_derive_light_palette_and_overrides() {
        let ops = ColorOperations::default();
        let mut palette = Palette::light_default();
        palette.set("text.muted", Color::rgb(0x6c, 0x6f, 0x85));
        palette.set("bg.overlay", Color::rgb(0xff, 0xff, 0xff));

        let ui = InterfacePalette::derive(&palette, &ops).unwrap();
        assert!(!ui.dark);
        assert_eq!(ui.overlay.background, Color::WHITE);
        for base in BaseSurface::ALL {
            assert_eq!(ui.surface(base).text.muted.to_string(), "#6c6f85");
        }
        assert_eq!(ui.button.foreground, Color::WHITE);
        assert_eq!(ui.status.success.to_string(), "#40a02b");
    }

    #[test]
    fn test_missing_status_colors_use_builtin_defaults() {
        let palette = Palette::from_colors([
            ("bg.base", Color::rgb(0x10, 0x10, 0x10)),
            ("text.primary", Color::rgb(0xee, 0xee, 0xee)),
            ("accent", Color::rgb(0x5f, 0x87, 0xd7)),
        ])
        .unwrap();
        let ui = InterfacePalette::derive(&palette, &ColorOperations::default()).unwrap();
        assert_eq!(ui.status.warning.to_string(), "#f9e2af");
        assert_eq!(ui.status.info.to_string(), "#89b4fa");
        assert_ne!(ui.status.info, ui.accent);
    }

    #[test]
    fn test_derivation_is_cached() {
        let ops = ColorOperations::new(ColorMode::Perceptual);
        let first = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();
        let misses = ops.cache_stats().misses;
        let second = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();
        assert_eq!(first, second);
        assert_eq!(ops.cache_stats().misses, misses);
    }
}
