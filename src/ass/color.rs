/*!
 * ASS color literals.
 *
 * Override tags carry colors as `&HBBGGRR&`, style definitions as
 * `&HAABBGGRR`. Both are little-endian (blue first) hex.
 */

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::EditError;

/// Accepts `&HBBGGRR&`, `&HAABBGGRR`, `HBBGGRR` and bare hex
static COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&?[Hh]?([0-9A-Fa-f]{1,8})&?$").expect("Invalid color regex")
});

/// RGBA color; `a` is ASS transparency (0 = opaque)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default)]
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// Opaque color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0 }
    }

    /// Parse an ASS color literal
    pub fn parse_ass(literal: &str) -> Result<Self, EditError> {
        let caps = COLOR_REGEX
            .captures(literal.trim())
            .ok_or_else(|| EditError::InvalidColor(literal.to_string()))?;
        let value = u32::from_str_radix(&caps[1], 16)
            .map_err(|_| EditError::InvalidColor(literal.to_string()))?;

        Ok(Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
            a: ((value >> 24) & 0xFF) as u8,
        })
    }

    /// Format for an override tag value: `&HBBGGRR&`, alpha dropped
    pub fn to_tag_value(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}&", self.b, self.g, self.r)
    }

    /// Format for a style definition: `&HAABBGGRR`
    pub fn to_style_value(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}{:02X}", self.a, self.b, self.g, self.r)
    }

    /// Compare ignoring transparency
    pub fn same_rgb(&self, other: &Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tag_value())
    }
}

impl FromStr for Color {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_ass(s)
    }
}
