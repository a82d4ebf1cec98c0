//! Immediate-mode raster driver for SPI TFT panels
//!
//! A driver for RGB565 TFT panel controllers (ST7789-class) driven over SPI.
//! There is no framebuffer: every drawing call is turned into an address
//! window plus a stream of pixel bytes as it happens.
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc` for row buffers)
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Four table-driven orientations with per-orientation panel offsets
//! - Lines, rectangles, circles and polygons, outlined or filled
//! - 8x8 bitmap text
//! - Streaming 24-bit bitmap blit (with `std`, straight from a file)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use tft_raster::{Builder, Color, Dimensions, Display, Interface, Rotation};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let dims = match Dimensions::new(240, 320) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).rotation(Rotation::Rotate90).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.initialize(&mut delay);
//! let _ = display.fill_screen(Color::BLACK);
//! let _ = display.draw_circle(160, 120, 40, Color::YELLOW, true);
//! let _ = display.draw_text(8, 8, "HELLO", Color::WHITE, Color::BLACK);
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Streaming bitmap blit
pub mod bitmap;
/// RGB565 color type
pub mod color;
/// Controller command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// 8x8 bitmap font and text drawing
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Line, rectangle, circle and polygon rasterization
pub mod raster;
/// Coordinate and orientation model
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

#[cfg(feature = "std")]
pub use bitmap::IoSource;
pub use bitmap::{BitmapSource, BmpHeader, SliceSource};
pub use color::Color;
pub use config::{Builder, Config, Dimensions, Offset, Rotation};
pub use display::{Display, Window};
pub use error::{BuilderError, Error};
pub use font::{FONT_8X8, Font, Glyph};
pub use interface::InterfaceError;
pub use interface::{DEFAULT_RESET_HOLD_MS, DEFAULT_RESET_SETTLE_MS, DisplayInterface, Interface};
pub use rotation::Geometry;
