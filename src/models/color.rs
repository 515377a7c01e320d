// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fill colours used by scene objects.
//!
//! Colours are stored in project files as CSS-style strings (`#ff0000`,
//! `#f00`, `#ff000080` or a handful of names) and held in memory as
//! straight-alpha RGBA bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The colour as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Copy of this colour with its alpha multiplied by `factor` (clamped to 0..=1).
    pub fn with_alpha_factor(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            a: (self.a as f64 * factor).round() as u8,
            ..self
        }
    }
}

/// Error produced when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseColorError(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(err());
            }
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            return match hex.len() {
                3 => Ok(Color::rgb(
                    nibble(0).map_err(|_| err())?,
                    nibble(1).map_err(|_| err())?,
                    nibble(2).map_err(|_| err())?,
                )),
                6 | 8 => {
                    let alpha = if hex.len() == 8 {
                        byte(6).map_err(|_| err())?
                    } else {
                        255
                    };
                    Ok(Color::rgba(
                        byte(0).map_err(|_| err())?,
                        byte(2).map_err(|_| err())?,
                        byte(4).map_err(|_| err())?,
                        alpha,
                    ))
                }
                _ => Err(err()),
            };
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::BLACK),
            "white" => Ok(Color::WHITE),
            "red" => Ok(Color::rgb(255, 0, 0)),
            "green" => Ok(Color::rgb(0, 128, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            "yellow" => Ok(Color::rgb(255, 255, 0)),
            "transparent" => Ok(Color::TRANSPARENT),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!("#F00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(
            "#00ff0080".parse::<Color>().unwrap(),
            Color::rgba(0, 255, 0, 128)
        );
    }

    #[test]
    fn test_parse_names_and_rejects_garbage() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::rgb(255, 0, 170).to_string(), "#ff00aa");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_alpha_factor_clamps() {
        assert_eq!(Color::WHITE.with_alpha_factor(0.5).a, 128);
        assert_eq!(Color::WHITE.with_alpha_factor(2.0).a, 255);
        assert_eq!(Color::WHITE.with_alpha_factor(-1.0).a, 0);
    }
}
