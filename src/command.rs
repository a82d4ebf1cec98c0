//! Panel controller command definitions
//!
//! Command bytes for MIPI-DCS style TFT controllers (ST7789 and relatives).
//! Commands are sent with the DC pin low and their parameters with DC high.
//!
//! ## Command Structure
//!
//! Every command byte is its own chip-select cycle:
//! 1. Assert CS
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Deassert CS
//!
//! Parameters follow in a separate data burst (DC high), which may carry any
//! number of bytes under a single CS assertion.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tft_raster::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! // Select RGB565
//! let _ = interface.send_command(command::PIXEL_FORMAT_SET);
//! let _ = interface.send_data(&[command::PIXEL_FORMAT_RGB565]);
//! ```

// System control commands

/// Software reset command (0x01)
///
/// Registers return to their reset defaults. Wait at least 150ms afterwards.
pub const SOFTWARE_RESET: u8 = 0x01;

/// Sleep out command (0x11)
///
/// Turns on the DC/DC converter and starts panel scanning.
/// Wait at least 120ms before the next command.
pub const SLEEP_OUT: u8 = 0x11;

/// Display on command (0x29)
///
/// Enables output from frame memory to the panel.
pub const DISPLAY_ON: u8 = 0x29;

// Configuration commands

/// Interface pixel format command (0x3A)
///
/// Requires 1 byte selecting the color depth.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// 16 bits per pixel, RGB565 (parameter for [`PIXEL_FORMAT_SET`])
pub const PIXEL_FORMAT_RGB565: u8 = 0x55;

/// Memory access control command (0x36)
///
/// Requires 1 byte: the MADCTL value selecting scan direction (MY/MX/MV)
/// and therefore the panel orientation.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Display inversion off command (0x20)
pub const INVERSION_OFF: u8 = 0x20;

/// Display inversion on command (0x21)
///
/// Most IPS panels need inversion enabled for colors to appear correctly.
pub const INVERSION_ON: u8 = 0x21;

// Frame memory commands

/// Column address set command (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Row address set command (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const ROW_ADDRESS_SET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Followed by pixel data filling the active window left to right,
/// top to bottom, two bytes per pixel.
pub const MEMORY_WRITE: u8 = 0x2C;
