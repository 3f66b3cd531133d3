//! Subtitle styles: the defaults an override tag falls back to.

use serde::{Deserialize, Serialize};

use crate::ass::color::Color;

/// The style attributes the edit panel reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikeout: bool,
    #[serde(default = "default_primary")]
    pub primary: Color,
    #[serde(default = "default_secondary")]
    pub secondary: Color,
    #[serde(default = "default_black")]
    pub outline: Color,
    #[serde(default = "default_black")]
    pub shadow: Color,
}

impl Style {
    /// Default attributes under a new name
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            font: default_font(),
            font_size: default_font_size(),
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            primary: default_primary(),
            secondary: default_secondary(),
            outline: default_black(),
            shadow: default_black(),
        }
    }
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_font_size() -> f64 {
    20.0
}

fn default_primary() -> Color {
    Color::WHITE
}

fn default_secondary() -> Color {
    Color::RED
}

fn default_black() -> Color {
    Color::BLACK
}
