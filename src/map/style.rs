// SPDX-License-Identifier: MPL-2.0
//! CSS-style colors and vector path styling.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An sRGB color parsed from a CSS color keyword or hex literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CssColor {
    pub const RED: Self = Self::from_rgb_hex(0xff0000);
    /// Default stroke color for vector features.
    pub const PATH_BLUE: Self = Self::from_rgb_hex(0x3388ff);

    #[must_use]
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Channels as floats in `0.0..=1.0`.
    #[must_use]
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("silver", 0xc0c0c0),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("white", 0xffffff),
    ("maroon", 0x800000),
    ("red", 0xff0000),
    ("purple", 0x800080),
    ("fuchsia", 0xff00ff),
    ("green", 0x008000),
    ("lime", 0x00ff00),
    ("olive", 0x808000),
    ("yellow", 0xffff00),
    ("navy", 0x000080),
    ("blue", 0x0000ff),
    ("teal", 0x008080),
    ("aqua", 0x00ffff),
    ("orange", 0xffa500),
];

/// Error returned when a color literal is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised color: {0}")]
pub struct ColorParseError(pub String);

impl FromStr for CssColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ColorParseError(trimmed.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(err());
            }
            return match hex.len() {
                3 => {
                    // #f03 expands to #ff0033
                    let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
                    u32::from_str_radix(&expanded, 16)
                        .map(Self::from_rgb_hex)
                        .map_err(|_| err())
                }
                6 => u32::from_str_radix(hex, 16)
                    .map(Self::from_rgb_hex)
                    .map_err(|_| err()),
                _ => Err(err()),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, hex)| Self::from_rgb_hex(*hex))
            .ok_or_else(err)
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Stroke and fill options for circles and polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: CssColor,
    /// Stroke width in pixels.
    pub weight: f32,
    pub opacity: f32,
    pub fill: bool,
    /// Falls back to `color` when unset.
    pub fill_color: Option<CssColor>,
    pub fill_opacity: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: CssColor::PATH_BLUE,
            weight: 3.0,
            opacity: 1.0,
            fill: true,
            fill_color: None,
            fill_opacity: 0.2,
        }
    }
}

impl PathStyle {
    #[must_use]
    pub fn with_color(mut self, color: CssColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: CssColor) -> Self {
        self.fill_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// The color actually used for the fill.
    #[must_use]
    pub fn effective_fill_color(&self) -> CssColor {
        self.fill_color.unwrap_or(self.color)
    }
}
