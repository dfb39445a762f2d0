//! Background color parsing and conversion
//!
//! The service accepts the background as a `#RRGGBB` hex string on each
//! request; this module owns the conversion into pixel values.

use crate::error::{BgCompError, Result};
use serde::{Deserialize, Serialize};

/// Solid background color for compositing
///
/// Alpha is implicit: the canvas built from this color is always fully
/// opaque, matching the "over" compositing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for BackgroundColor {
    fn default() -> Self {
        // Default to white background
        Self::white()
    }
}

impl BackgroundColor {
    /// Create a new background color with RGB values
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a white background color (255, 255, 255)
    #[must_use]
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Create a black background color (0, 0, 0)
    #[must_use]
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parse a `#RRGGBB` hex color string
    ///
    /// The leading `#` is optional. The remaining string must be exactly
    /// six ASCII hex digits; the three byte pairs decode left to right into
    /// red, green, and blue.
    ///
    /// # Errors
    ///
    /// Returns `BgCompError::InvalidColor` when the string is not exactly
    /// six hex digits after stripping the optional `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.len() != 6 {
            return Err(BgCompError::invalid_color(format!(
                "expected 6 hex digits, got {} in {:?}",
                digits.len(),
                hex
            )));
        }

        let component = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| {
                    BgCompError::invalid_color(format!("non-hex characters in {:?}", hex))
                })
        };

        Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    /// Render as a `#rrggbb` hex string
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to an opaque RGBA pixel (alpha fixed at 255)
    #[must_use]
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_hash() {
        let red = BackgroundColor::from_hex("#FF0000").unwrap();
        assert_eq!(red, BackgroundColor::new(255, 0, 0));
        assert_eq!(red.to_rgba().0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_parse_without_hash() {
        let green = BackgroundColor::from_hex("00FF00").unwrap();
        assert_eq!(green, BackgroundColor::new(0, 255, 0));
        assert_eq!(green.to_rgba().0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_parse_lowercase() {
        let color = BackgroundColor::from_hex("#a1b2c3").unwrap();
        assert_eq!(color, BackgroundColor::new(0xa1, 0xb2, 0xc3));
    }

    #[test]
    fn test_parse_byte_pair_order() {
        let color = BackgroundColor::from_hex("102030").unwrap();
        assert_eq!((color.r, color.g, color.b), (0x10, 0x20, 0x30));
    }

    #[test]
    fn test_reject_short_input() {
        assert!(BackgroundColor::from_hex("#fff").is_err());
        assert!(BackgroundColor::from_hex("").is_err());
        assert!(BackgroundColor::from_hex("#").is_err());
    }

    #[test]
    fn test_reject_long_input() {
        assert!(BackgroundColor::from_hex("#ff00ff00").is_err());
    }

    #[test]
    fn test_reject_non_hex() {
        assert!(BackgroundColor::from_hex("zzzzzz").is_err());
        assert!(BackgroundColor::from_hex("#12g456").is_err());
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(BackgroundColor::default(), BackgroundColor::white());
    }

    #[test]
    fn test_hex_round_trip() {
        let color = BackgroundColor::new(255, 0, 128);
        assert_eq!(color.to_hex(), "#ff0080");
        assert_eq!(BackgroundColor::from_hex(&color.to_hex()).unwrap(), color);
    }
}
