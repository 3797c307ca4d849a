// ABOUTME: Color arithmetic (mix, lighten, darken, alpha) in sRGB and OKLCH
// ABOUTME: ColorOperations dispatches on ColorMode and memoizes results in its own cache

use chromaforge_logging::debug;
use chromaforge_types::{Color, ColorMode};
use parking_lot::Mutex;

use crate::cache::{CacheMetrics, ColorCache, DEFAULT_CACHE_CAPACITY};

/// Clamp to [0, 1], mapping NaN to 0
fn unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn lerp_byte(a: u8, b: u8, t: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Alpha of a mix: only present when either endpoint wrote one
fn mixed_alpha(a: Color, b: Color, t: f64) -> Option<u8> {
    if a.has_alpha() || b.has_alpha() {
        Some(lerp_byte(a.alpha(), b.alpha(), t))
    } else {
        None
    }
}

fn attach_alpha(color: Color, alpha: Option<u8>) -> Color {
    match alpha {
        Some(a) => color.with_alpha_byte(a),
        None => color.opaque(),
    }
}

/// Byte-space arithmetic. Total for every input.
pub mod srgb {
    use super::*;

    pub fn mix(a: Color, b: Color, t: f64) -> Color {
        let t = unit(t);
        let rgb = Color::rgb(
            lerp_byte(a.r, b.r, t),
            lerp_byte(a.g, b.g, t),
            lerp_byte(a.b, b.b, t),
        );
        attach_alpha(rgb, mixed_alpha(a, b, t))
    }

    /// Mix toward white; the input's alpha is kept
    pub fn lighten(color: Color, amount: f64) -> Color {
        attach_alpha(mix(color.opaque(), Color::WHITE, amount), color.alpha_byte())
    }

    /// Mix toward black; the input's alpha is kept
    pub fn darken(color: Color, amount: f64) -> Color {
        attach_alpha(mix(color.opaque(), Color::BLACK, amount), color.alpha_byte())
    }
}

/// OKLCH arithmetic. Returns `None` when the computation degenerates.
pub mod perceptual {
    use super::*;
    use crate::converter::ColorSpaceConverter;
    use chromaforge_types::OklchColor;

    const ACHROMATIC_CHROMA: f64 = 1e-4;

    fn finish(lch: OklchColor, alpha: Option<u8>) -> Option<Color> {
        if !lch.is_finite() {
            return None;
        }
        let lch = ColorSpaceConverter::clamp_to_srgb_gamut(lch);
        if !lch.is_finite() {
            return None;
        }
        Some(attach_alpha(ColorSpaceConverter::oklch_to_color(lch), alpha))
    }

    /// L and C interpolate linearly, hue along the shortest arc
    pub fn mix(a: Color, b: Color, t: f64) -> Option<Color> {
        let t = t.clamp(0.0, 1.0);
        let mut from = ColorSpaceConverter::color_to_oklch(a);
        let mut to = ColorSpaceConverter::color_to_oklch(b);

        // Grays have no meaningful hue; borrow the other endpoint's
        if from.c < ACHROMATIC_CHROMA {
            from.h = to.h;
        }
        if to.c < ACHROMATIC_CHROMA {
            to.h = from.h;
        }

        let dh = ((to.h - from.h + 540.0) % 360.0) - 180.0;
        let lch = OklchColor::new(
            from.l + (to.l - from.l) * t,
            from.c + (to.c - from.c) * t,
            from.h + dh * t,
        );

        finish(lch, mixed_alpha(a, b, t))
    }

    pub fn lighten(color: Color, amount: f64) -> Option<Color> {
        adjust_lightness(color, amount * 0.1)
    }

    pub fn darken(color: Color, amount: f64) -> Option<Color> {
        adjust_lightness(color, -amount * 0.5)
    }

    fn adjust_lightness(color: Color, delta: f64) -> Option<Color> {
        let mut lch = ColorSpaceConverter::color_to_oklch(color);
        lch.l = (lch.l + delta).clamp(0.0, 1.0);
        finish(lch, color.alpha_byte())
    }
}

/// Mode-dispatched, memoized color arithmetic.
///
/// Each instance owns its cache. Perceptual results that degenerate are
/// recomputed in sRGB.
#[derive(Debug)]
pub struct ColorOperations {
    mode: ColorMode,
    cache: Mutex<ColorCache>,
}

impl ColorOperations {
    pub fn new(mode: ColorMode) -> Self {
        Self::with_cache_capacity(mode, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(mode: ColorMode, capacity: usize) -> Self {
        Self {
            mode,
            cache: Mutex::new(ColorCache::with_capacity(capacity)),
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Switch modes; cached entries stay valid because keys carry the mode
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    pub fn mix(&self, a: Color, b: Color, t: f64) -> Color {
        if t <= 0.0 || a == b {
            return a;
        }
        if t >= 1.0 {
            return b;
        }

        let key = format!("mix:{}:{a}:{b}:{t}", self.mode);
        self.memoize(key, || match self.mode {
            ColorMode::Srgb => srgb::mix(a, b, t),
            ColorMode::Perceptual => perceptual::mix(a, b, t).unwrap_or_else(|| {
                debug!(from = %a, to = %b, t, "Perceptual mix degenerated, using sRGB");
                srgb::mix(a, b, t)
            }),
        })
    }

    pub fn lighten(&self, color: Color, amount: f64) -> Color {
        let amount = unit(amount);
        let key = format!("lighten:{}:{color}:{amount}", self.mode);
        self.memoize(key, || match self.mode {
            ColorMode::Srgb => srgb::lighten(color, amount),
            ColorMode::Perceptual => perceptual::lighten(color, amount).unwrap_or_else(|| {
                debug!(color = %color, amount, "Perceptual lighten degenerated, using sRGB");
                srgb::lighten(color, amount)
            }),
        })
    }

    pub fn darken(&self, color: Color, amount: f64) -> Color {
        let amount = unit(amount);
        let key = format!("darken:{}:{color}:{amount}", self.mode);
        self.memoize(key, || match self.mode {
            ColorMode::Srgb => srgb::darken(color, amount),
            ColorMode::Perceptual => perceptual::darken(color, amount).unwrap_or_else(|| {
                debug!(color = %color, amount, "Perceptual darken degenerated, using sRGB");
                srgb::darken(color, amount)
            }),
        })
    }

    /// Replace the alpha byte with `round(clamp(alpha) * 255)`
    pub fn with_alpha(&self, color: Color, alpha: f64) -> Color {
        let byte = (unit(alpha) * 255.0).round() as u8;
        color.with_alpha_byte(byte)
    }

    fn memoize<F>(&self, key: String, compute: F) -> Color
    where
        F: FnOnce() -> Color,
    {
        if let Some(hit) = self.cache.lock().get(&key) {
            return hit;
        }
        // Compute outside the lock; results are deterministic so a racing
        // insert of the same key stores the same value
        let value = compute();
        self.cache.lock().set(key, value);
        value
    }

    pub fn cache_stats(&self) -> CacheMetrics {
        self.cache.lock().metrics()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl Default for ColorOperations {
    fn default() -> Self {
        Self::new(ColorMode::default())
    }
}
