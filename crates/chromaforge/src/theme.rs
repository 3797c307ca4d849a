// ABOUTME: Token-to-color rules for a generated theme
// ABOUTME: Each registered token maps to a palette slot, a derived blend or a resolved foreground

use std::collections::BTreeMap;

use chromaforge_color::ColorOperations;
use chromaforge_tokens::{TokenRegistry, ValidationReport};
use chromaforge_types::{BaseSurface, Color, SurfaceKind, TextRole};

use crate::palette::{InterfacePalette, Slot};
use crate::resolver::ForegroundResolver;

use BaseSurface::{Base, Elevated, Overlay};
use Slot::*;

/// How one token gets its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Copy a palette slot
    Slot(Slot),
    /// Let the resolver pick text for the token's surface, preferring a role
    Foreground(TextRole),
    /// Palette slot with its alpha replaced
    Translucent(Slot, f64),
    /// Mix of two palette slots
    Blend(Slot, Slot, f64),
}

const PRIMARY_TEXT: Slot = Text(Base, TextRole::Primary);

/// Rules for every non-deprecated token in the built-in table
pub const THEME_RULES: &[(&str, Rule)] = &[
    // Global
    ("foreground", Rule::Foreground(TextRole::Primary)),
    ("descriptionForeground", Rule::Foreground(TextRole::Muted)),
    ("disabledForeground", Rule::Slot(Text(Base, TextRole::Inactive))),
    ("errorForeground", Rule::Slot(Error)),
    ("focusBorder", Rule::Slot(FocusBorder)),
    ("contrastBorder", Rule::Slot(Border)),
    ("widget.shadow", Rule::Slot(Shadow)),
    ("textLink.foreground", Rule::Slot(Accent)),
    // Editor
    ("editor.background", Rule::Slot(Background(Base))),
    ("editor.foreground", Rule::Foreground(TextRole::Primary)),
    ("editor.selectionBackground", Rule::Slot(Selection)),
    ("editor.lineHighlightBackground", Rule::Slot(LineHighlight)),
    ("editor.hoverHighlightBackground", Rule::Translucent(Accent, 0.15)),
    ("editorCursor.foreground", Rule::Slot(Accent)),
    ("editorGutter.background", Rule::Slot(Background(Base))),
    ("editorLineNumber.foreground", Rule::Foreground(TextRole::Subtle)),
    ("editorLineNumber.activeForeground", Rule::Foreground(TextRole::Muted)),
    ("editorIndentGuide.background1", Rule::Blend(Background(Base), PRIMARY_TEXT, 0.12)),
    ("editorIndentGuide.activeBackground1", Rule::Blend(Background(Base), PRIMARY_TEXT, 0.3)),
    ("editorGroup.border", Rule::Slot(Border)),
    ("editorError.foreground", Rule::Slot(Error)),
    ("editorWarning.foreground", Rule::Slot(Warning)),
    ("editorInfo.foreground", Rule::Slot(Info)),
    ("editorError.background", Rule::Translucent(Error, 0.1)),
    ("editorBracketMatch.background", Rule::Translucent(Accent, 0.2)),
    ("diffEditor.insertedTextBackground", Rule::Translucent(Success, 0.15)),
    ("diffEditor.removedTextBackground", Rule::Translucent(Error, 0.15)),
    ("editorWidget.background", Rule::Slot(Background(Elevated))),
    ("editorWidget.foreground", Rule::Foreground(TextRole::Primary)),
    ("editorWidget.border", Rule::Slot(Border)),
    // Terminal
    ("terminal.background", Rule::Slot(Background(Base))),
    ("terminal.foreground", Rule::Foreground(TextRole::Primary)),
    ("terminalCursor.foreground", Rule::Slot(Accent)),
    ("terminal.selectionBackground", Rule::Slot(Selection)),
    // Status bar
    ("statusBar.background", Rule::Slot(Background(Base))),
    ("statusBar.foreground", Rule::Foreground(TextRole::Muted)),
    ("statusBar.border", Rule::Slot(Border)),
    ("statusBarItem.hoverBackground", Rule::Slot(Hover)),
    // Tabs
    ("editorGroupHeader.tabsBackground", Rule::Slot(Background(Base))),
    ("tab.activeBackground", Rule::Slot(Background(Base))),
    ("tab.inactiveBackground", Rule::Slot(Background(Base))),
    ("tab.activeForeground", Rule::Foreground(TextRole::Primary)),
    ("tab.inactiveForeground", Rule::Foreground(TextRole::Muted)),
    ("tab.border", Rule::Slot(Border)),
    ("tab.activeBorderTop", Rule::Slot(Accent)),
    ("tab.hoverBackground", Rule::Slot(Hover)),
    // Side bar
    ("sideBar.background", Rule::Slot(Background(Base))),
    ("sideBar.foreground", Rule::Foreground(TextRole::Muted)),
    ("sideBar.border", Rule::Slot(Border)),
    ("sideBarSectionHeader.foreground", Rule::Foreground(TextRole::Primary)),
    ("gitDecoration.addedResourceForeground", Rule::Slot(Success)),
    ("gitDecoration.modifiedResourceForeground", Rule::Slot(Warning)),
    ("gitDecoration.deletedResourceForeground", Rule::Slot(Error)),
    // Activity bar
    ("activityBar.background", Rule::Slot(Background(Base))),
    ("activityBar.foreground", Rule::Foreground(TextRole::Primary)),
    ("activityBar.inactiveForeground", Rule::Foreground(TextRole::Subtle)),
    ("activityBarBadge.background", Rule::Slot(BadgeBackground)),
    ("activityBarBadge.foreground", Rule::Slot(BadgeForeground)),
    // Breadcrumbs
    ("breadcrumb.background", Rule::Slot(Background(Base))),
    ("breadcrumb.foreground", Rule::Foreground(TextRole::Muted)),
    ("breadcrumb.focusForeground", Rule::Foreground(TextRole::Primary)),
    // Panel
    ("panel.background", Rule::Slot(Background(Elevated))),
    ("panel.border", Rule::Slot(Border)),
    ("panelTitle.activeForeground", Rule::Foreground(TextRole::Primary)),
    ("panelTitle.inactiveForeground", Rule::Foreground(TextRole::Muted)),
    ("panelTitle.activeBorder", Rule::Slot(Accent)),
    // Menu
    ("menu.background", Rule::Slot(Background(Elevated))),
    ("menu.foreground", Rule::Foreground(TextRole::Primary)),
    ("menu.selectionBackground", Rule::Slot(Active)),
    ("menu.separatorBackground", Rule::Slot(Border)),
    // Lists
    ("list.hoverBackground", Rule::Slot(Hover)),
    ("list.activeSelectionBackground", Rule::Slot(Selection)),
    ("list.inactiveSelectionBackground", Rule::Slot(Active)),
    ("list.highlightForeground", Rule::Slot(Accent)),
    // Inputs
    ("input.background", Rule::Slot(Background(Elevated))),
    ("input.foreground", Rule::Foreground(TextRole::Primary)),
    ("input.border", Rule::Slot(Border)),
    ("input.placeholderForeground", Rule::Foreground(TextRole::Subtle)),
    ("dropdown.background", Rule::Slot(DropdownBackground)),
    ("dropdown.foreground", Rule::Slot(DropdownForeground)),
    ("dropdown.border", Rule::Slot(DropdownBorder)),
    // Buttons and badges
    ("button.background", Rule::Slot(ButtonBackground)),
    ("button.foreground", Rule::Slot(ButtonForeground)),
    ("button.hoverBackground", Rule::Slot(ButtonHover)),
    ("badge.background", Rule::Slot(BadgeBackground)),
    ("badge.foreground", Rule::Slot(BadgeForeground)),
    // Scrollbars
    ("scrollbarSlider.background", Rule::Translucent(PRIMARY_TEXT, 0.2)),
    ("scrollbarSlider.hoverBackground", Rule::Translucent(PRIMARY_TEXT, 0.3)),
    ("scrollbarSlider.activeBackground", Rule::Translucent(PRIMARY_TEXT, 0.4)),
    // Quick input
    ("quickInput.background", Rule::Slot(Background(Overlay))),
    ("quickInput.foreground", Rule::Foreground(TextRole::Primary)),
    ("quickInputList.focusBackground", Rule::Slot(Selection)),
    // Notifications
    ("notifications.background", Rule::Slot(Background(Overlay))),
    ("notifications.foreground", Rule::Foreground(TextRole::Primary)),
    ("notifications.border", Rule::Slot(Border)),
    ("notificationsErrorIcon.foreground", Rule::Slot(Error)),
    ("notificationsWarningIcon.foreground", Rule::Slot(Warning)),
    ("notificationsInfoIcon.foreground", Rule::Slot(Info)),
];

/// A flat token map with its validation report
#[derive(Debug, Clone)]
pub struct GeneratedTheme {
    pub dark: bool,
    pub tokens: BTreeMap<String, String>,
    pub report: ValidationReport,
}

impl GeneratedTheme {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tokens.get(key).map(String::as_str)
    }
}

/// Applies theme rules to an interface palette
pub struct ThemeGenerator<'a> {
    palette: &'a InterfacePalette,
    ops: &'a ColorOperations,
    registry: &'a TokenRegistry,
    resolver: &'a ForegroundResolver,
}

impl<'a> ThemeGenerator<'a> {
    pub fn new(
        palette: &'a InterfacePalette,
        ops: &'a ColorOperations,
        registry: &'a TokenRegistry,
        resolver: &'a ForegroundResolver,
    ) -> Self {
        Self {
            palette,
            ops,
            registry,
            resolver,
        }
    }

    pub fn color_for(&self, key: &str, rule: Rule) -> Color {
        match rule {
            Rule::Slot(slot) => self.palette.slot(slot),
            Rule::Foreground(role) => match self.registry.get(key) {
                Some(meta) => self.resolver.resolve_for_token(self.palette, meta, role).color,
                None => self.resolver.resolve(self.palette, SurfaceKind::Base, role),
            },
            Rule::Translucent(slot, alpha) => self.ops.with_alpha(self.palette.slot(slot), alpha),
            Rule::Blend(from, to, t) => {
                self.ops
                    .mix(self.palette.slot(from), self.palette.slot(to), t)
            }
        }
    }

    /// Evaluate every rule, then copy colors onto aliases of generated tokens
    pub fn build(&self, rules: &[(&str, Rule)]) -> BTreeMap<String, String> {
        let mut tokens: BTreeMap<String, String> = rules
            .iter()
            .map(|(key, rule)| (key.to_string(), self.color_for(key, *rule).to_string()))
            .collect();

        let aliases: Vec<(String, String)> = self
            .registry
            .iter()
            .filter(|meta| meta.alias_of.is_some() && !tokens.contains_key(&meta.key))
            .filter_map(|meta| {
                let target = self.registry.resolve_alias(&meta.key).ok()?;
                let color = tokens.get(&target)?;
                Some((meta.key.clone(), color.clone()))
            })
            .collect();
        tokens.extend(aliases);

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use std::collections::BTreeSet;

    #[test]
    fn test_rules_cover_builtin_table() {
        let registry = TokenRegistry::with_defaults().unwrap();
        let ruled: BTreeSet<&str> = THEME_RULES.iter().map(|(key, _)| *key).collect();
        assert_eq!(ruled.len(), THEME_RULES.len(), "duplicate rule");

        for key in &ruled {
            assert!(registry.contains(key), "rule for unregistered token {key}");
        }
        for meta in registry.iter().filter(|meta| !meta.deprecated) {
            assert!(ruled.contains(meta.key.as_str()), "no rule for {}", meta.key);
        }
    }

    #[test]
    fn test_aliases_receive_target_color() {
        let registry = TokenRegistry::with_defaults().unwrap();
        let ops = ColorOperations::default();
        let resolver = ForegroundResolver::default();
        let palette = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();
        let tokens = ThemeGenerator::new(&palette, &ops, &registry, &resolver).build(THEME_RULES);

        assert_eq!(
            tokens.get("editorIndentGuide.background"),
            tokens.get("editorIndentGuide.background1")
        );
        assert!(tokens.contains_key("editorIndentGuide.activeBackground"));
    }

    #[test]
    fn test_rule_kinds() {
        let registry = TokenRegistry::with_defaults().unwrap();
        let ops = ColorOperations::default();
        let resolver = ForegroundResolver::default();
        let palette = InterfacePalette::derive(&Palette::dark_default(), &ops).unwrap();
        let builder = ThemeGenerator::new(&palette, &ops, &registry, &resolver);

        assert_eq!(
            builder.color_for("x", Rule::Slot(Background(Base))).to_string(),
            "#1e1e2e"
        );
        assert_eq!(
            builder.color_for("x", Rule::Translucent(Accent, 0.25)).to_string(),
            "#89b4fa40"
        );
        assert_eq!(
            builder.color_for("x", Rule::Blend(Background(Base), PRIMARY_TEXT, 0.0)),
            palette.base.background
        );
        // Unregistered tokens resolve against the base surface
        assert_eq!(
            builder.color_for("unknown.foreground", Rule::Foreground(TextRole::Primary)),
            palette.base.text.primary
        );
    }
}
