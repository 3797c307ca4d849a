// ABOUTME: WCAG 2.1 relative luminance and contrast ratios
// ABOUTME: Alpha-aware variant composites translucent foregrounds over their background first

use chromaforge_logging::trace;
use chromaforge_types::Color;

use crate::converter::ColorSpaceConverter;

/// WCAG contrast ratio requirements
pub struct ContrastRatios;

impl ContrastRatios {
    /// WCAG AAA standard for normal text
    pub const AAA_NORMAL: f64 = 7.0;
    /// WCAG AA standard for normal text
    pub const AA_NORMAL: f64 = 4.5;
    /// WCAG AA standard for large text
    pub const AA_LARGE: f64 = 3.0;
    /// Minimum for any readable text
    pub const MIN_READABLE: f64 = 2.0;
}

/// Contrast measurement between foreground and background colors
pub struct ContrastEvaluator;

impl ContrastEvaluator {
    /// Relative luminance (0.0 = black, 1.0 = white); alpha is ignored
    pub fn relative_luminance(color: Color) -> f64 {
        let (r, g, b) = color.to_unit_rgb();
        0.2126 * ColorSpaceConverter::srgb_to_linear(r)
            + 0.7152 * ColorSpaceConverter::srgb_to_linear(g)
            + 0.0722 * ColorSpaceConverter::srgb_to_linear(b)
    }

    /// Symmetric ratio in [1, 21]
    pub fn contrast_ratio(a: Color, b: Color) -> f64 {
        let la = Self::relative_luminance(a);
        let lb = Self::relative_luminance(b);
        let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Composite `fg` over `bg` as `fg * a + bg * (1 - a)` per channel.
    ///
    /// The result is opaque. The background's own alpha is not considered.
    pub fn flatten(fg: Color, bg: Color) -> Color {
        if fg.is_opaque() {
            return fg.opaque();
        }
        let a = fg.alpha_unit();
        let channel = |f: u8, b: u8| (f64::from(f) * a + f64::from(b) * (1.0 - a)).round() as u8;
        Color::rgb(channel(fg.r, bg.r), channel(fg.g, bg.g), channel(fg.b, bg.b))
    }

    /// Contrast of `fg` as it actually renders on `bg`
    pub fn contrast_ratio_aware(fg: Color, bg: Color) -> f64 {
        Self::contrast_ratio(Self::flatten(fg, bg), bg)
    }

    /// Ratio of two hex strings; `None` when either is malformed
    pub fn contrast_ratio_str(a: &str, b: &str) -> Option<f64> {
        let (a, b) = Self::parse_pair(a, b)?;
        Some(Self::contrast_ratio(a, b))
    }

    /// Alpha-aware ratio of two hex strings; `None` when either is malformed
    pub fn contrast_ratio_aware_str(fg: &str, bg: &str) -> Option<f64> {
        let (fg, bg) = Self::parse_pair(fg, bg)?;
        Some(Self::contrast_ratio_aware(fg, bg))
    }

    fn parse_pair(a: &str, b: &str) -> Option<(Color, Color)> {
        match (Color::parse(a), Color::parse(b)) {
            (Ok(a), Ok(b)) => Some((a, b)),
            (Err(e), _) | (_, Err(e)) => {
                trace!(error = %e, "Contrast not applicable to malformed color");
                None
            }
        }
    }

    pub fn meets(ratio: f64, threshold: f64) -> bool {
        ratio >= threshold
    }
}
