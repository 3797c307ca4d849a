// ABOUTME: OKLab and OKLCH coordinate types
// ABOUTME: Plain value types; conversions live in chromaforge-color

use serde::{Deserialize, Serialize};

/// OKLab color (L, a, b)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCH color: lightness in [0, 1], chroma >= 0, hue in degrees [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OklchColor {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl OklchColor {
    /// Chroma ceiling applied before converting back to sRGB
    pub const MAX_CHROMA: f64 = 0.5;

    /// Construct with lightness clamped, chroma floored at zero and hue wrapped
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            c: c.max(0.0),
            h: normalize_hue(h),
        }
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.c.is_finite() && self.h.is_finite()
    }
}

/// Wrap a hue in degrees into [0, 360)
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
