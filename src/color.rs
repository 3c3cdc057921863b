//! RGBA color values with hexadecimal parsing.
//!
//! Pipe segments store their displayed color as one of these; the console
//! surface parses user-supplied `#RRGGBB` style strings into it.

use crate::error::{PipeworksError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Fully opaque color from red/green/blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse a hexadecimal color string.
    ///
    /// Accepts `#RGB`, `#RRGGBB` and `#RRGGBBAA` forms, with the leading `#`
    /// required. Anything else is rejected with `InvalidColor`.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| PipeworksError::invalid_color(value))?;

        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(PipeworksError::invalid_color(value));
        }

        match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .map(|ch| expand_nibble(ch.to_digit(16).unwrap_or(0) as u8));
                Ok(Self::rgb(
                    channels.next().unwrap_or(0),
                    channels.next().unwrap_or(0),
                    channels.next().unwrap_or(0),
                ))
            }
            6 | 8 => {
                let parse_pair = |idx: usize| {
                    u8::from_str_radix(&digits[idx..idx + 2], 16)
                        .map_err(|_| PipeworksError::invalid_color(value))
                };
                let r = parse_pair(0)?;
                let g = parse_pair(2)?;
                let b = parse_pair(4)?;
                let a = if digits.len() == 8 { parse_pair(6)? } else { 0xFF };
                Ok(Self { r, g, b, a })
            }
            _ => Err(PipeworksError::invalid_color(value)),
        }
    }
}

/// Duplicate a 4-bit channel into both halves of a byte (`0xF` becomes `0xFF`).
fn expand_nibble(nibble: u8) -> u8 {
    (nibble << 4) | nibble
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}
