// Two-colour palette
//
// The display only ever shows a background and a foreground colour. Colours
// are kept as 0xRRGGBB values and expanded to the RGBA bytes the pixels crate
// expects when written to a surface.

use crate::error::ConfigError;

/// Default background (black)
pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x000000);

/// Default foreground (white)
pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xFFFFFF);

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Create a colour from a 0xRRGGBB value (upper byte ignored)
    pub const fn rgb(rgb: u32) -> Self {
        Color(rgb & 0x00FF_FFFF)
    }

    /// Parse a `#RRGGBB` string
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ConfigError::Color(hex.to_string()))?;

        u32::from_str_radix(digits, 16)
            .map(Color::rgb)
            .map_err(|_| ConfigError::Color(hex.to_string()))
    }

    /// The 0xRRGGBB value
    pub fn to_rgb(self) -> u32 {
        self.0
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.0)
    }

    /// Bytes in the order expected by the pixels crate
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        rgb_to_rgba(self.0)
    }
}

/// Convert RGB color to RGBA format expected by pixels crate
///
/// # Arguments
/// * `rgb` - 32-bit RGB color (0xRRGGBB)
///
/// # Returns
/// Array of [R, G, B, A] bytes
#[inline]
pub fn rgb_to_rgba(rgb: u32) -> [u8; 4] {
    [
        ((rgb >> 16) & 0xFF) as u8, // Red
        ((rgb >> 8) & 0xFF) as u8,  // Green
        (rgb & 0xFF) as u8,         // Blue
        0xFF,                       // Alpha (fully opaque)
    ]
}
