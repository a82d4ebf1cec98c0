//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with `Rgb565` colors, so any
//! embedded-graphics primitive, font or image can be drawn straight to the
//! panel. There is no framebuffer: every call turns into window writes.
//!
//! Solid fills are clipped to the panel and go through the batched path (one
//! window, one burst per row). Contiguous fills are clipped too and sent one
//! row window at a time; if the colors run out early, the rest of the area
//! is left untouched. Pixel iterators fall back to single-pixel windows.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use tft_raster::{Builder, Dimensions, Display, Interface};
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
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let dims = match Dimensions::new(240, 320) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut delay = MockDelay;
//! let mut display = Display::new(interface, config);
//! let _ = display.initialize(&mut delay);
//!
//! let _ = display.clear(Rgb565::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb565::YELLOW, 2))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, TFT!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Rgb565::WHITE),
//! )
//! .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions as _, OriginDimensions, Point, Size},
    pixelcolor::Rgb565,
    prelude::Pixel,
    primitives::{PointsIter, Rectangle},
};

use alloc::vec::Vec;

use crate::color::Color;
use crate::display::{Display, Window};
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.draw_pixel(x, y, color.into())?;
        }
        Ok(())
    }

    fn fill_contiguous<Iter>(&mut self, area: &Rectangle, colors: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Self::Color>,
    {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.bottom_right().is_none() {
            return Ok(());
        }

        let mut colors = area
            .points()
            .zip(colors)
            .filter(|(point, _)| drawable.contains(*point))
            .map(|(_, color)| Color::from(color));

        // One window per row; the iterator may end early, so a row is only
        // addressed once its pixels are in hand.
        let width = drawable.size.width as usize;
        let mut row = Vec::with_capacity(width * 2);
        // drawable lies on the panel, so every coordinate fits u16
        let x0 = drawable.top_left.x as u16;
        for y in drawable.rows() {
            row.clear();
            for color in colors.by_ref().take(width) {
                row.extend_from_slice(&color.to_be_bytes());
            }
            let count = row.len() / 2;
            if count == 0 {
                break;
            }
            let window = Window::new(x0, y as u16, x0 + (count - 1) as u16, y as u16);
            self.begin_write(window)?;
            self.write_burst(&row)?;
            self.end_write()?;
            if count < width {
                break;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        self.fill_rect(
            area.top_left.x,
            area.top_left.y,
            bottom_right.x,
            bottom_right.y,
            color.into(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color.into())
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    /// Logical size for the active rotation
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}
