// ABOUTME: UI surface classification for contrast decisions
// ABOUTME: Every semantic surface resolves to exactly one of three base tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three appearance tiers text contrast is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaseSurface {
    Base,
    Elevated,
    Overlay,
}

impl BaseSurface {
    pub const ALL: [BaseSurface; 3] = [BaseSurface::Base, BaseSurface::Elevated, BaseSurface::Overlay];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseSurface::Base => "base",
            BaseSurface::Elevated => "elevated",
            BaseSurface::Overlay => "overlay",
        }
    }
}

impl fmt::Display for BaseSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named UI region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceKind {
    #[default]
    Base,
    Elevated,
    Overlay,
    Editor,
    Terminal,
    StatusBar,
    Tabs,
    Sidebar,
    ActivityBar,
    Breadcrumb,
    Panel,
    Menu,
    List,
    QuickInput,
    Notification,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 15] = [
        SurfaceKind::Base,
        SurfaceKind::Elevated,
        SurfaceKind::Overlay,
        SurfaceKind::Editor,
        SurfaceKind::Terminal,
        SurfaceKind::StatusBar,
        SurfaceKind::Tabs,
        SurfaceKind::Sidebar,
        SurfaceKind::ActivityBar,
        SurfaceKind::Breadcrumb,
        SurfaceKind::Panel,
        SurfaceKind::Menu,
        SurfaceKind::List,
        SurfaceKind::QuickInput,
        SurfaceKind::Notification,
    ];

    /// The base tier this surface draws its background from
    pub fn base(&self) -> BaseSurface {
        match self {
            SurfaceKind::Base
            | SurfaceKind::Editor
            | SurfaceKind::Terminal
            | SurfaceKind::StatusBar
            | SurfaceKind::Tabs
            | SurfaceKind::Sidebar
            | SurfaceKind::ActivityBar
            | SurfaceKind::Breadcrumb => BaseSurface::Base,
            SurfaceKind::Elevated | SurfaceKind::Panel | SurfaceKind::Menu | SurfaceKind::List => {
                BaseSurface::Elevated
            }
            SurfaceKind::Overlay | SurfaceKind::QuickInput | SurfaceKind::Notification => {
                BaseSurface::Overlay
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Base => "base",
            SurfaceKind::Elevated => "elevated",
            SurfaceKind::Overlay => "overlay",
            SurfaceKind::Editor => "editor",
            SurfaceKind::Terminal => "terminal",
            SurfaceKind::StatusBar => "statusBar",
            SurfaceKind::Tabs => "tabs",
            SurfaceKind::Sidebar => "sidebar",
            SurfaceKind::ActivityBar => "activityBar",
            SurfaceKind::Breadcrumb => "breadcrumb",
            SurfaceKind::Panel => "panel",
            SurfaceKind::Menu => "menu",
            SurfaceKind::List => "list",
            SurfaceKind::QuickInput => "quickInput",
            SurfaceKind::Notification => "notification",
        }
    }
}

impl From<BaseSurface> for SurfaceKind {
    fn from(base: BaseSurface) -> Self {
        match base {
            BaseSurface::Base => SurfaceKind::Base,
            BaseSurface::Elevated => SurfaceKind::Elevated,
            BaseSurface::Overlay => SurfaceKind::Overlay,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown surface '{0}'")]
pub struct UnknownSurface(pub String);

impl FromStr for SurfaceKind {
    type Err = UnknownSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SurfaceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownSurface(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_surfaces_resolve_to_base_tiers() {
        for kind in [
            SurfaceKind::Editor,
            SurfaceKind::Terminal,
            SurfaceKind::StatusBar,
            SurfaceKind::Tabs,
            SurfaceKind::Sidebar,
            SurfaceKind::ActivityBar,
            SurfaceKind::Breadcrumb,
        ] {
            assert_eq!(kind.base(), BaseSurface::Base, "{kind}");
        }
        for kind in [SurfaceKind::Panel, SurfaceKind::Menu, SurfaceKind::List] {
            assert_eq!(kind.base(), BaseSurface::Elevated, "{kind}");
        }
        for kind in [SurfaceKind::QuickInput, SurfaceKind::Notification] {
            assert_eq!(kind.base(), BaseSurface::Overlay, "{kind}");
        }
    }

    #[test]
    fn test_base_surfaces_map_to_themselves() {
        for base in BaseSurface::ALL {
            assert_eq!(SurfaceKind::from(base).base(), base);
        }
        assert_eq!(SurfaceKind::default(), SurfaceKind::Base);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!("quickInput".parse::<SurfaceKind>(), Ok(SurfaceKind::QuickInput));
        assert_eq!("statusBar".parse::<SurfaceKind>(), Ok(SurfaceKind::StatusBar));
        assert!("status_bar".parse::<SurfaceKind>().is_err());

        for kind in SurfaceKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
