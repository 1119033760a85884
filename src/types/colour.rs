//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{TmxError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex colour string as written by map editors.
    ///
    /// Supports formats:
    /// - `#RRGGBB` (opaque)
    /// - `#AARRGGBB` (alpha first)
    ///
    /// The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(invalid_colour(s));
        }

        match hex.len() {
            6 => {
                let r = parse_hex_byte(s, &hex[0..2])?;
                let g = parse_hex_byte(s, &hex[2..4])?;
                let b = parse_hex_byte(s, &hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            8 => {
                let a = parse_hex_byte(s, &hex[0..2])?;
                let r = parse_hex_byte(s, &hex[2..4])?;
                let g = parse_hex_byte(s, &hex[4..6])?;
                let b = parse_hex_byte(s, &hex[6..8])?;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_colour(s)),
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = TmxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

fn invalid_colour(s: &str) -> TmxError {
    TmxError::Format {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RRGGBB or #AARRGGBB format".to_string()),
    }
}

/// Parse a two-character hex byte.
fn parse_hex_byte(full: &str, s: &str) -> Result<u8> {
    // `from_str_radix` accepts a leading '+', which is not a hex digit.
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_colour(full));
    }
    u8::from_str_radix(s, 16).map_err(|_| invalid_colour(full))
}
