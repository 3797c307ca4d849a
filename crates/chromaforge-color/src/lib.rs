// ABOUTME: Perceptual color engine for theme derivation
// ABOUTME: sRGB/OKLCH conversion, memoized mix/lighten/darken and WCAG contrast measurement

pub mod cache;
pub mod contrast;
pub mod converter;
pub mod operations;

pub use cache::{CacheConfig, CacheMetrics, ColorCache, DEFAULT_CACHE_CAPACITY};
pub use contrast::{ContrastEvaluator, ContrastRatios};
pub use converter::ColorSpaceConverter;
pub use operations::{ColorOperations, perceptual, srgb};

pub use chromaforge_types::{Color, ColorMode, Oklab, OklchColor, ParseError};
