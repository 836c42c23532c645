//! Color types, hex conversion and brightness arithmetic.
//!
//! Colors travel through the pipeline as 24-bit `#rrggbb` hex strings; [`Rgba`]
//! is the arithmetic form used while encoding.

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse an opaque color from `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything but a `#` followed by six
    /// hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as lowercase `#rrggbb`, dropping alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale each RGB channel by `1 + amount`, clamped to 0-255.
    ///
    /// `0` is identity, `1` doubles every channel, `-1` yields black.
    /// Larger magnitudes saturate instead of wrapping.
    #[must_use]
    pub fn adjust_brightness(self, amount: f32) -> Self {
        let adjust = |c: u8| {
            let c = f32::from(c);
            (c + c * amount).clamp(0.0, 255.0) as u8
        };
        Self::new(adjust(self.r), adjust(self.g), adjust(self.b), self.a)
    }
}

/// Adjust the brightness of a `#rrggbb` color; see [`Rgba::adjust_brightness`].
///
/// ```rust
/// use trueno_facet::color::adjust_brightness;
///
/// assert_eq!(adjust_brightness("#1f77b4", 0.0).unwrap(), "#1f77b4");
/// assert_eq!(adjust_brightness("#1f77b4", 1_000_000.0).unwrap(), "#ffffff");
/// ```
pub fn adjust_brightness(hex: &str, amount: f32) -> Result<String> {
    Ok(Rgba::from_hex(hex)?.adjust_brightness(amount).to_hex())
}

/// Category10 palette colors.
pub const CATEGORY10: [Rgba; 10] = [
    Rgba::rgb(0x1f, 0x77, 0xb4),
    Rgba::rgb(0xff, 0x7f, 0x0e),
    Rgba::rgb(0x2c, 0xa0, 0x2c),
    Rgba::rgb(0xd6, 0x27, 0x28),
    Rgba::rgb(0x94, 0x67, 0xbd),
    Rgba::rgb(0x8c, 0x56, 0x4b),
    Rgba::rgb(0xe3, 0x77, 0xc2),
    Rgba::rgb(0x7f, 0x7f, 0x7f),
    Rgba::rgb(0xbc, 0xbd, 0x22),
    Rgba::rgb(0x17, 0xbe, 0xcf),
];

/// Colors available to the color encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
    default: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self::category10()
    }
}

impl Palette {
    /// Category10 with its first color as default.
    #[must_use]
    pub fn category10() -> Self {
        Self {
            colors: CATEGORY10.to_vec(),
            default: CATEGORY10[0],
        }
    }

    /// Create a palette from categorical colors and a default color.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(colors: Vec<Rgba>, default: Rgba) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Palette requires at least one color".to_string()));
        }
        Ok(Self { colors, default })
    }

    /// Default color for unencoded glyphs and the base of measure shading.
    #[must_use]
    pub fn default_color(&self) -> Rgba {
        self.default
    }

    /// Categorical color for an ordinal position; wraps around.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct categorical colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgba::from_hex("#1f77b4").unwrap();
        assert_eq!(color, Rgba::rgb(31, 119, 180));
        assert_eq!(color.to_hex(), "#1f77b4");
    }

    #[test]
    fn test_from_hex_uppercase() {
        assert_eq!(Rgba::from_hex("#FF7F0E").unwrap(), CATEGORY10[1]);
    }

    #[test]
    fn test_from_hex_invalid() {
        for bad in ["adfasdfasdf", "1f77b4", "#1f77b", "#1f77b4ff", "#gg77b4", ""] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(Error::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_adjust_brightness_identity() {
        assert_eq!(adjust_brightness("#1f77b4", 0.0).unwrap(), "#1f77b4");
    }

    #[test]
    fn test_adjust_brightness_clamps_to_white() {
        assert_eq!(adjust_brightness("#1f77b4", 1_000_000.0).unwrap(), "#ffffff");
        assert_eq!(adjust_brightness("#1f77b4", 9_999_999_999.0).unwrap(), "#ffffff");
    }

    #[test]
    fn test_adjust_brightness_black() {
        assert_eq!(adjust_brightness("#1f77b4", -1.0).unwrap(), "#000000");
        assert_eq!(adjust_brightness("#1f77b4", -5.0).unwrap(), "#000000");
    }

    #[test]
    fn test_adjust_brightness_half() {
        // 31 * 1.5 = 46.5, 119 * 1.5 = 178.5, 180 * 1.5 = 270 -> 255
        let lighter = Rgba::from_hex("#1f77b4").unwrap().adjust_brightness(0.5);
        assert_eq!(lighter, Rgba::rgb(46, 178, 255));
    }

    #[test]
    fn test_adjust_brightness_invalid() {
        assert!(adjust_brightness("blue", 0.5).is_err());
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color_at(0), palette.color_at(10));
        assert_eq!(palette.default_color().to_hex(), "#1f77b4");
    }

    #[test]
    fn test_palette_rejects_empty() {
        assert!(Palette::new(Vec::new(), Rgba::BLACK).is_err());
    }
}
