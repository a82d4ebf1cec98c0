//! RGB565 color type
//!
//! This module defines the [`Color`] newtype used by every drawing primitive.
//! The panel is driven in 16-bit RGB565 mode, so a color is a single `u16`
//! packing 5 bits of red, 6 bits of green and 5 bits of blue.
//!
//! ## Wire Format
//!
//! | Bits   | 15..11 | 10..5 | 4..0 |
//! |--------|--------|-------|------|
//! | Field  | Red    | Green | Blue |
//!
//! Colors are always transmitted most-significant byte first.
//!
//! ## Example
//!
//! ```
//! use tft_raster::Color;
//!
//! let orange = Color::from_rgb888(255, 128, 0);
//! assert_eq!(orange.to_be_bytes(), [0xFC, 0x00]);
//!
//! // Only the low 16 bits of a wider literal are kept
//! assert_eq!(Color::from_bits_truncate(0x00FF_FF00), Color::new(0xFF00));
//! ```

/// 16-bit RGB565 color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(u16);

impl Color {
    /// Black (0x0000)
    pub const BLACK: Self = Self(0x0000);
    /// White (0xFFFF)
    pub const WHITE: Self = Self(0xFFFF);
    /// Pure red (0xF800)
    pub const RED: Self = Self(0xF800);
    /// Pure green (0x07E0)
    pub const GREEN: Self = Self(0x07E0);
    /// Pure blue (0x001F)
    pub const BLUE: Self = Self(0x001F);
    /// Yellow (0xFFE0)
    pub const YELLOW: Self = Self(0xFFE0);

    /// Create a color from a raw RGB565 value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Create a color from a wider integer, keeping only the low 16 bits
    pub const fn from_bits_truncate(raw: u32) -> Self {
        Self((raw & 0xFFFF) as u16)
    }

    /// Pack 8-bit-per-channel components into RGB565
    ///
    /// The low bits of each channel are dropped: `((r & 0xF8) << 8) |
    /// ((g & 0xFC) << 3) | (b >> 3)`.
    ///
    /// ```
    /// use tft_raster::Color;
    ///
    /// assert_eq!(Color::from_rgb888(255, 0, 0), Color::RED);
    /// assert_eq!(Color::from_rgb888(0, 0, 255), Color::BLUE);
    /// ```
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0xF8) << 8;
        let g = (g as u16 & 0xFC) << 3;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// Raw RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// High byte (`value >> 8`)
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Low byte (`value & 0xFF`)
    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Bytes in transmission order (MSB first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::raw::{RawData, RawU16};
        Self(RawU16::from(color).into_inner())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.0))
    }
}
