// ABOUTME: Token policy registry for chromaforge themes
// ABOUTME: Alpha policy checks, alias resolution, coverage drift and contrast audits over token maps

pub mod error;
pub mod registry;
pub mod validation;


pub use error::{RegistryError, RegistryImportError, Result};
pub use registry::{TokenMeta, TokenRegistry};
pub use validation::{AlphaPolicyViolation, ContrastWarning, CoverageReport, ValidationReport};
