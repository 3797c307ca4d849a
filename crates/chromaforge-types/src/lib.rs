// ABOUTME: Core type definitions shared by every chromaforge crate
// ABOUTME: Pure data structures with no engine logic, kept at the bottom of the layer stack

pub mod color;
pub mod oklch;
pub mod policy;
pub mod surface;

pub use color::{Color, ParseError};
pub use oklch::{Oklab, OklchColor};
pub use policy::{AlphaPolicy, ColorMode, ContrastHints, ContrastThresholds, TextRole, WcagLevel};
pub use surface::{BaseSurface, SurfaceKind, UnknownSurface};
