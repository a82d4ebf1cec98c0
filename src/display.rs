//! Core display operations
//!
//! [`Display`] owns the transport, the configuration and the active
//! [`Geometry`]. It encodes the controller protocol (initialization,
//! orientation, address window, memory write) and the batched fill path that
//! every filled primitive reduces to.
//!
//! Every memory-write burst is bracketed: the active window is set, the
//! memory-write command is issued, and the number of pixel bytes that follow
//! is checked against the window area before the burst is closed.

use alloc::vec;
use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_ON, INVERSION_OFF, INVERSION_ON, MEMORY_ACCESS_CONTROL,
    MEMORY_WRITE, PIXEL_FORMAT_RGB565, PIXEL_FORMAT_SET, ROW_ADDRESS_SET, SLEEP_OUT,
    SOFTWARE_RESET,
};
use crate::config::{Config, Rotation};
use crate::error::Error;
use crate::font::{FONT_8X8, Font};
use crate::interface::DisplayInterface;
use crate::rotation::Geometry;

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Inclusive rectangle in logical coordinates
///
/// This is the unit of window addressing: one window is set, then exactly
/// `pixel_count()` pixels are written into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Left column
    pub x0: u16,
    /// Top row
    pub y0: u16,
    /// Right column (inclusive)
    pub x1: u16,
    /// Bottom row (inclusive)
    pub y1: u16,
}

impl Window {
    /// Create a new window
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Single-pixel window
    pub fn point(x: u16, y: u16) -> Self {
        Self::new(x, y, x, y)
    }

    /// Columns covered
    pub fn width(&self) -> usize {
        usize::from(self.x1.saturating_sub(self.x0)) + 1
    }

    /// Rows covered
    pub fn height(&self) -> usize {
        usize::from(self.y1.saturating_sub(self.y0)) + 1
    }

    /// Pixels covered
    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Build a window from clipped, ordered `i32` corners
    fn from_clipped((x0, y0, x1, y1): (i32, i32, i32, i32)) -> Option<Self> {
        Some(Self::new(
            u16::try_from(x0).ok()?,
            u16::try_from(y0).ok()?,
            u16::try_from(x1).ok()?,
            u16::try_from(y1).ok()?,
        ))
    }
}

/// Bookkeeping for an open memory-write burst
#[derive(Clone, Copy, Debug)]
struct Burst {
    expected: usize,
    written: usize,
}

/// Core display driver
///
/// This struct provides the controller protocol and the drawing primitives.
/// For embedded-graphics support, enable the `graphics` feature.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    pub(crate) interface: I,
    /// Display configuration
    config: Config,
    /// Size and offset for the active rotation
    geometry: Geometry,
    /// Glyph table used by text drawing
    pub(crate) font: Font,
    /// Open memory-write burst, if any
    burst: Option<Burst>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent to the panel until [`initialize`](Self::initialize).
    pub fn new(interface: I, config: Config) -> Self {
        let geometry = Geometry::new(&config, config.rotation);
        Self {
            interface,
            config,
            geometry,
            font: FONT_8X8,
            burst: None,
        }
    }

    /// Perform hardware reset, software reset and the power-up sequence
    ///
    /// In order: reset pulse, software reset, sleep-out, RGB565 pixel format,
    /// memory access control for the configured rotation, inversion, full
    /// native address window, display on.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!(
            "initializing {}x{} panel",
            self.config.dimensions.width,
            self.config.dimensions.height
        );
        self.interface.reset(delay).map_err(Error::Interface)?;

        self.send_command(SOFTWARE_RESET)?;
        delay.delay_ms(self.config.soft_reset_delay_ms);

        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(self.config.sleep_out_delay_ms);

        self.send_command(PIXEL_FORMAT_SET)?;
        self.send_data(&[PIXEL_FORMAT_RGB565])?;

        let rotation = self.config.rotation;
        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[self.config.madctl(rotation)])?;
        self.geometry = Geometry::new(&self.config, rotation);

        if self.config.invert_colors {
            self.send_command(INVERSION_ON)?;
        } else {
            self.send_command(INVERSION_OFF)?;
        }

        // Native resolution, no offset
        let [w_hi, w_lo] = self.config.dimensions.width.saturating_sub(1).to_be_bytes();
        let [h_hi, h_lo] = self.config.dimensions.height.saturating_sub(1).to_be_bytes();
        self.send_command(COLUMN_ADDRESS_SET)?;
        self.send_data(&[0x00, 0x00, w_hi, w_lo])?;
        self.send_command(ROW_ADDRESS_SET)?;
        self.send_data(&[0x00, 0x00, h_hi, h_lo])?;

        self.send_command(DISPLAY_ON)?;
        self.burst = None;
        Ok(())
    }

    /// Select one of the four orientations by index
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRotation` for any value outside `0..=3`; nothing
    /// is sent in that case.
    pub fn set_rotation(&mut self, rotation: u8) -> DisplayResult<I> {
        let rotation =
            Rotation::try_from(rotation).map_err(|value| Error::InvalidRotation { value })?;
        self.set_orientation(rotation)
    }

    /// Select an orientation
    ///
    /// Writes the table-driven MADCTL byte, then swaps in the width, height
    /// and offset for that orientation as one unit.
    pub fn set_orientation(&mut self, rotation: Rotation) -> DisplayResult<I> {
        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[self.config.madctl(rotation)])?;
        self.geometry = Geometry::new(&self.config, rotation);
        log::debug!(
            "rotation {:?}: {}x{} offset ({}, {})",
            rotation,
            self.geometry.width,
            self.geometry.height,
            self.geometry.offset.x,
            self.geometry.offset.y
        );
        Ok(())
    }

    /// Set the controller's active window
    ///
    /// Adds the current offset to all four coordinates and sends them as
    /// big-endian column and row ranges. Corners are not reordered; the caller
    /// must pass `x0 <= x1` and `y0 <= y1`.
    ///
    /// # Errors
    ///
    /// Returns `Error::CoordinateOverflow` if a shifted coordinate does not fit
    /// 16 bits.
    #[allow(clippy::many_single_char_names)]
    pub fn set_active_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> DisplayResult<I> {
        let geometry = self.geometry;
        let (ax0, ay0) = geometry
            .to_address(i32::from(x0), i32::from(y0))
            .ok_or(Error::CoordinateOverflow {
                x: i32::from(x0),
                y: i32::from(y0),
            })?;
        let (ax1, ay1) = geometry
            .to_address(i32::from(x1), i32::from(y1))
            .ok_or(Error::CoordinateOverflow {
                x: i32::from(x1),
                y: i32::from(y1),
            })?;
        log::trace!("window columns {ax0}..={ax1}, rows {ay0}..={ay1}");

        let [x0_hi, x0_lo] = ax0.to_be_bytes();
        let [x1_hi, x1_lo] = ax1.to_be_bytes();
        self.send_command(COLUMN_ADDRESS_SET)?;
        self.send_data(&[x0_hi, x0_lo, x1_hi, x1_lo])?;

        let [y0_hi, y0_lo] = ay0.to_be_bytes();
        let [y1_hi, y1_lo] = ay1.to_be_bytes();
        self.send_command(ROW_ADDRESS_SET)?;
        self.send_data(&[y0_hi, y0_lo, y1_hi, y1_lo])?;
        Ok(())
    }

    /// Fill the whole logical screen with one color
    pub fn fill_screen(&mut self, color: Color) -> DisplayResult<I> {
        let right = i32::from(self.geometry.width) - 1;
        let bottom = i32::from(self.geometry.height) - 1;
        self.fill_rect(0, 0, right, bottom, color)
    }

    /// Draw a single pixel
    ///
    /// Pixels outside the logical panel are skipped.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) -> DisplayResult<I> {
        if !self.geometry.contains(x, y) {
            return Ok(());
        }
        // contains() guarantees both fit u16
        let window = Window::point(x as u16, y as u16);
        self.begin_write(window)?;
        self.write_burst(&color.to_be_bytes())?;
        self.end_write()
    }

    /// Fill a rectangle using one window and one row buffer
    ///
    /// Corners may be given in any order. The rectangle is clipped to the
    /// panel. One row of color pairs is built once and sent once per row.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> DisplayResult<I> {
        let Some(window) = self
            .geometry
            .clip_rect(x0, y0, x1, y1)
            .and_then(Window::from_clipped)
        else {
            return Ok(());
        };

        let row = color.to_be_bytes().repeat(window.width());
        self.begin_write(window)?;
        for _ in 0..window.height() {
            self.write_burst(&row)?;
        }
        self.end_write()
    }

    /// Fill the horizontal span `[x0, x1]` on row `y`
    pub fn fill_span(&mut self, x0: i32, x1: i32, y: i32, color: Color) -> DisplayResult<I> {
        match self.geometry.clip_span(x0, x1, y) {
            Some((lo, hi)) => self.fill_rect(lo, y, hi, y, color),
            None => Ok(()),
        }
    }

    /// Write a full window of pixels, one row at a time
    ///
    /// `fill_row` is called once per row with a buffer of `width * 2` bytes to
    /// fill with big-endian RGB565 pixels. The buffer is reused across rows.
    pub(crate) fn write_rows<F>(&mut self, window: Window, mut fill_row: F) -> DisplayResult<I>
    where
        F: FnMut(usize, &mut [u8]) -> DisplayResult<I>,
    {
        let mut row = vec![0u8; window.width() * 2];
        self.begin_write(window)?;
        for index in 0..window.height() {
            fill_row(index, &mut row)?;
            self.write_burst(&row)?;
        }
        self.end_write()
    }

    /// Set the active window and open a memory-write burst for it
    pub(crate) fn begin_write(&mut self, window: Window) -> DisplayResult<I> {
        self.burst = None;
        self.set_active_window(window.x0, window.y0, window.x1, window.y1)?;
        self.send_command(MEMORY_WRITE)?;
        self.burst = Some(Burst {
            expected: window.pixel_count() * 2,
            written: 0,
        });
        Ok(())
    }

    /// Send pixel bytes into the open burst
    ///
    /// Refuses to send more bytes than the window declared.
    pub(crate) fn write_burst(&mut self, data: &[u8]) -> DisplayResult<I> {
        let burst = self.burst.unwrap_or(Burst {
            expected: 0,
            written: 0,
        });
        let total = burst.written + data.len();
        if self.burst.is_none() || total > burst.expected {
            self.burst = None;
            return Err(Error::BurstLengthMismatch {
                expected: burst.expected,
                provided: total,
            });
        }
        self.send_data(data)?;
        self.burst = Some(Burst {
            expected: burst.expected,
            written: total,
        });
        Ok(())
    }

    /// Close the open burst, checking it filled the window exactly
    pub(crate) fn end_write(&mut self) -> DisplayResult<I> {
        match self.burst.take() {
            Some(burst) if burst.written == burst.expected => Ok(()),
            Some(burst) => Err(Error::BurstLengthMismatch {
                expected: burst.expected,
                provided: burst.written,
            }),
            None => Err(Error::BurstLengthMismatch {
                expected: 0,
                provided: 0,
            }),
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Size and offset for the active rotation
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Logical width for the active rotation
    pub fn width(&self) -> u16 {
        self.geometry.width
    }

    /// Logical height for the active rotation
    pub fn height(&self) -> u16 {
        self.geometry.height
    }

    /// Get display rotation
    pub fn rotation(&self) -> Rotation {
        self.geometry.rotation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the glyph table used by [`draw_text`](Self::draw_text)
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Glyph table used by text drawing
    pub fn font(&self) -> Font {
        self.font
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }
}
