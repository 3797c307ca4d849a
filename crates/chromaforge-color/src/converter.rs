// ABOUTME: sRGB <-> linear <-> OKLab <-> OKLCH conversions (D65, per the OKLab definition)
// ABOUTME: Pure math with gamut helpers; malformed hex input fails with ParseError

use chromaforge_types::oklch::normalize_hue;
use chromaforge_types::{Color, Oklab, OklchColor, ParseError};

/// Color space conversion helpers
pub struct ColorSpaceConverter;

impl ColorSpaceConverter {
    // ==========================
    // Linear sRGB companding
    // ==========================
    pub fn srgb_to_linear(v: f64) -> f64 {
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    pub fn linear_to_srgb(v: f64) -> f64 {
        if v <= 0.0031308 {
            12.92 * v
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        }
    }

    // ==========================
    // Linear sRGB <-> OKLab
    // ==========================
    pub fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> Oklab {
        // Linear sRGB -> LMS (OKLab M1)
        let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
        let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
        let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // LMS' -> OKLab (OKLab M2)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    pub fn oklab_to_linear_srgb(lab: Oklab) -> (f64, f64, f64) {
        // OKLab -> LMS'
        let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
        let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
        let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

        let l = l_.powi(3);
        let m = m_.powi(3);
        let s = s_.powi(3);

        // LMS -> linear sRGB
        (
            4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        )
    }

    // ==========================
    // OKLab <-> OKLCH (polar form, hue in degrees)
    // ==========================
    pub fn oklab_to_oklch(lab: Oklab) -> OklchColor {
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let h = normalize_hue(lab.b.atan2(lab.a).to_degrees());
        OklchColor { l: lab.l, c, h }
    }

    pub fn oklch_to_oklab(lch: OklchColor) -> Oklab {
        let h = lch.h.to_radians();
        Oklab {
            l: lch.l,
            a: lch.c * h.cos(),
            b: lch.c * h.sin(),
        }
    }

    // ==========================
    // Color <-> OKLCH
    // ==========================
    pub fn color_to_oklab(color: Color) -> Oklab {
        let (r, g, b) = color.to_unit_rgb();
        Self::linear_srgb_to_oklab(
            Self::srgb_to_linear(r),
            Self::srgb_to_linear(g),
            Self::srgb_to_linear(b),
        )
    }

    /// OKLCH coordinates of a color; alpha is not part of the result
    pub fn color_to_oklch(color: Color) -> OklchColor {
        Self::oklab_to_oklch(Self::color_to_oklab(color))
    }

    /// Parse `#rrggbb` and convert; eight-digit and unprefixed forms are rejected
    pub fn hex_to_oklch(hex: &str) -> Result<OklchColor, ParseError> {
        let color = Color::parse(hex)?;
        if color.has_alpha() || !hex.starts_with('#') {
            return Err(ParseError::NotRgbHex {
                input: hex.to_string(),
            });
        }
        Ok(Self::color_to_oklch(color))
    }

    /// Opaque color for OKLCH coordinates.
    ///
    /// Lightness is clamped to [0, 1], chroma to [0, 0.5] and out-of-gamut
    /// channels are clipped.
    pub fn oklch_to_color(lch: OklchColor) -> Color {
        let (r, g, b) = Self::oklch_to_unit_rgb(lch);
        Color::from_unit_rgb(r, g, b)
    }

    pub fn oklch_to_hex(lch: OklchColor) -> String {
        Self::oklch_to_color(lch).to_string()
    }

    /// Gamma-encoded channels before clipping
    fn oklch_to_unit_rgb(lch: OklchColor) -> (f64, f64, f64) {
        let lch = Self::soft_clamp(lch);
        let (r, g, b) = Self::oklab_to_linear_srgb(Self::oklch_to_oklab(lch));
        (
            Self::linear_to_srgb(r),
            Self::linear_to_srgb(g),
            Self::linear_to_srgb(b),
        )
    }

    fn soft_clamp(lch: OklchColor) -> OklchColor {
        OklchColor {
            l: lch.l.clamp(0.0, 1.0),
            c: lch.c.clamp(0.0, OklchColor::MAX_CHROMA),
            h: normalize_hue(lch.h),
        }
    }

    // ==========================
    // Gamut handling
    // ==========================
    pub fn is_in_srgb_gamut(lch: OklchColor) -> bool {
        const EPS: f64 = 1e-6;
        let (r, g, b) = Self::oklab_to_linear_srgb(Self::oklch_to_oklab(Self::soft_clamp(lch)));
        [r, g, b]
            .iter()
            .all(|v| (-EPS..=1.0 + EPS).contains(v))
    }

    /// Reduce chroma until the color fits sRGB, preserving hue and lightness
    pub fn clamp_to_srgb_gamut(mut lch: OklchColor) -> OklchColor {
        lch = Self::soft_clamp(lch);
        for _ in 0..16 {
            if Self::is_in_srgb_gamut(lch) {
                return lch;
            }
            lch.c *= 0.9;
            if lch.c < 1e-4 {
                lch.c = 0.0;
                break;
            }
        }
        lch
    }
}
