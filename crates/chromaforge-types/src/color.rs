// ABOUTME: Immutable sRGB color value with an optional explicit alpha byte
// ABOUTME: Parses and prints the `#rrggbb` / `#rrggbbaa` wire format used by theme files

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a color string is not well-formed hex
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty color string")]
    Empty,

    #[error("color '{input}' has {len} hex digits, expected 6 or 8")]
    InvalidLength { input: String, len: usize },

    #[error("color '{input}' contains a non-hex digit")]
    InvalidDigit { input: String },

    #[error("color '{input}' is not an opaque '#rrggbb' value")]
    NotRgbHex { input: String },
}

/// An sRGB color.
///
/// `alpha` is `None` for colors written with six digits. A color written with
/// eight digits keeps its alpha byte even when it is `ff`, so `#112233` and
/// `#112233ff` render identically but print differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    alpha: Option<u8>,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color without an explicit alpha byte
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Color with an explicit alpha byte
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: Some(a),
        }
    }

    /// Build from unit-range channels, clamping and rounding each to a byte
    pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional)
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.is_empty() {
            return Err(ParseError::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidDigit {
                input: input.to_string(),
            });
        }
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ParseError::InvalidLength {
                input: input.to_string(),
                len: digits.len(),
            });
        }

        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ParseError::InvalidDigit {
                input: input.to_string(),
            })
        };

        let alpha = if digits.len() == 8 {
            Some(byte(6)?)
        } else {
            None
        };

        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            alpha,
        })
    }

    /// Whether the color carries an explicit alpha byte
    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// The explicit alpha byte, if any
    pub fn alpha_byte(&self) -> Option<u8> {
        self.alpha
    }

    /// Effective alpha byte (`ff` when none is written)
    pub fn alpha(&self) -> u8 {
        self.alpha.unwrap_or(u8::MAX)
    }

    /// Effective alpha in [0, 1]
    pub fn alpha_unit(&self) -> f64 {
        f64::from(self.alpha()) / 255.0
    }

    /// True when the color renders fully opaque
    pub fn is_opaque(&self) -> bool {
        self.alpha() == u8::MAX
    }

    /// Same RGB with the alpha byte dropped
    pub fn opaque(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Same RGB with the alpha byte replaced
    pub fn with_alpha_byte(self, alpha: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, alpha)
    }

    /// Channels as unit-range floats
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Lowercase wire form
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

/// Clamp a unit-range channel and round it to a byte; NaN maps to 0
pub fn unit_to_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if let Some(a) = self.alpha {
            write!(f, "{a:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}
