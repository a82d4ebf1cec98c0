//! Streaming 24-bit bitmap blit
//!
//! The image is never held in memory. The header is decoded from the first
//! bytes of a [`BitmapSource`], the window is set once, and every stored row
//! is read, converted to RGB565, mirrored horizontally and sent as one burst.
//! Memory use is two row buffers, independent of image height.
//!
//! Rows are sent in stored order. A bottom-up file therefore appears upside
//! down unless the panel orientation compensates; only the horizontal axis is
//! flipped, which matches the panel's mounting.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use tft_raster::{Builder, Dimensions, Display, DisplayInterface};
//! # use embedded_hal::delay::DelayNs;
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn send_command(&mut self, _: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _: &mut D) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn example(image: &[u8]) -> Result<(), tft_raster::Error<MockInterface>> {
//! use tft_raster::bitmap::SliceSource;
//!
//! # let config = match Builder::new().dimensions(Dimensions { width: 240, height: 320 }).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return Ok(()),
//! # };
//! let mut display = Display::new(MockInterface, config);
//! display.show_bitmap(&mut SliceSource::new(image), 10, 20)?;
//! # Ok(())
//! # }
//! ```

use alloc::vec;

use crate::color::Color;
use crate::display::{Display, DisplayResult, Window};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Bytes of the file header that are decoded
pub const HEADER_LEN: usize = 30;

/// The only supported pixel depth
pub const SUPPORTED_BIT_DEPTH: u16 = 24;

const PIXEL_OFFSET_FIELD: usize = 10;
const WIDTH_FIELD: usize = 18;
const HEIGHT_FIELD: usize = 22;
const BIT_DEPTH_FIELD: usize = 28;

/// Random-access byte source for bitmap data
pub trait BitmapSource {
    /// Error type for the underlying storage
    type Error: core::fmt::Debug;

    /// Move the read position to `position` bytes from the start
    fn seek(&mut self, position: u32) -> Result<(), Self::Error>;

    /// Fill `buf` completely from the current position
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<S: BitmapSource + ?Sized> BitmapSource for &mut S {
    type Error = S::Error;

    fn seek(&mut self, position: u32) -> Result<(), Self::Error> {
        (**self).seek(position)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_exact(buf)
    }
}

/// Error from reading past the end of a [`SliceSource`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnexpectedEnd {
    /// Read position when the read was attempted
    pub position: usize,
    /// Bytes requested
    pub requested: usize,
    /// Total length of the slice
    pub len: usize,
}

/// Bitmap source over an in-memory byte slice
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Read from the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.position
    }
}

impl BitmapSource for SliceSource<'_> {
    type Error = UnexpectedEnd;

    fn seek(&mut self, position: u32) -> Result<(), Self::Error> {
        let position = position as usize;
        if position > self.data.len() {
            return Err(UnexpectedEnd {
                position,
                requested: 0,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let end = self.position + buf.len();
        let Some(bytes) = self.data.get(self.position..end) else {
            return Err(UnexpectedEnd {
                position: self.position,
                requested: buf.len(),
                len: self.data.len(),
            });
        };
        buf.copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }
}

/// Bitmap source over any `std::io` reader that can seek
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R> IoSource<R>
where
    R: std::io::Read + std::io::Seek,
{
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R> BitmapSource for IoSource<R>
where
    R: std::io::Read + std::io::Seek,
{
    type Error = std::io::Error;

    fn seek(&mut self, position: u32) -> Result<(), Self::Error> {
        self.inner
            .seek(std::io::SeekFrom::Start(u64::from(position)))
            .map(|_| ())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.read_exact(buf)
    }
}

/// Fields of the bitmap header the blit depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Byte offset of the first pixel row
    pub pixel_offset: u32,
    /// Image width in pixels
    pub width: i32,
    /// Image height in pixels
    pub height: i32,
    /// Bits per pixel
    pub bits_per_pixel: u16,
}

impl BmpHeader {
    /// Decode the little-endian header fields
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        let u32_at = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        Self {
            pixel_offset: u32_at(PIXEL_OFFSET_FIELD),
            width: u32_at(WIDTH_FIELD) as i32,
            height: u32_at(HEIGHT_FIELD) as i32,
            bits_per_pixel: u16::from_le_bytes([bytes[BIT_DEPTH_FIELD], bytes[BIT_DEPTH_FIELD + 1]]),
        }
    }

    /// Read and decode the header from the start of `source`
    pub fn read<S: BitmapSource>(source: &mut S) -> Result<Self, S::Error> {
        let mut bytes = [0u8; HEADER_LEN];
        source.seek(0)?;
        source.read_exact(&mut bytes)?;
        Ok(Self::parse(&bytes))
    }

    /// Bytes per stored row
    ///
    /// Rows are read back to back; no 4-byte row padding is skipped.
    pub fn row_len(&self) -> usize {
        self.width.max(0) as usize * 3
    }

    /// Window covering the image with its top-left corner at `(x, y)`
    ///
    /// `None` if the image is empty or does not fit 16-bit coordinates.
    pub fn window(&self, x: u16, y: u16) -> Option<Window> {
        let width = u16::try_from(self.width).ok().filter(|&w| w > 0)?;
        let height = u16::try_from(self.height).ok().filter(|&h| h > 0)?;
        Some(Window::new(
            x,
            y,
            x.checked_add(width - 1)?,
            y.checked_add(height - 1)?,
        ))
    }
}

/// Convert one stored B,G,R row into big-endian RGB565, mirrored
///
/// Source pixel `x` lands at output column `width - 1 - x`. `out` must hold
/// two bytes per source pixel.
pub fn convert_row(bgr: &[u8], out: &mut [u8]) {
    for (source, target) in bgr.chunks_exact(3).zip(out.chunks_exact_mut(2).rev()) {
        let color = Color::from_rgb888(source[2], source[1], source[0]);
        target.copy_from_slice(&color.to_be_bytes());
    }
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Stream a 24-bit bitmap to the panel with its top-left corner at `(x, y)`
    ///
    /// The header is validated before anything is sent. One window and one
    /// memory-write cover the whole image; each row is one burst.
    ///
    /// # Errors
    ///
    /// - `Error::UnsupportedBitDepth` for any depth other than 24
    /// - `Error::InvalidBitmapHeader` for an empty image or one whose window
    ///   does not fit 16-bit coordinates
    /// - `Error::BitmapRead` if the source fails or ends early
    pub fn show_bitmap<S: BitmapSource>(&mut self, source: &mut S, x: u16, y: u16) -> DisplayResult<I> {
        let header = BmpHeader::read(&mut *source).map_err(|err| {
            log::error!("bitmap header read failed: {:?}", err);
            Error::BitmapRead
        })?;
        log::debug!(
            "bitmap {}x{} at offset {}, {} bpp",
            header.width,
            header.height,
            header.pixel_offset,
            header.bits_per_pixel
        );

        if header.bits_per_pixel != SUPPORTED_BIT_DEPTH {
            return Err(Error::UnsupportedBitDepth {
                bits: header.bits_per_pixel,
            });
        }
        let window = header.window(x, y).ok_or(Error::InvalidBitmapHeader {
            width: header.width,
            height: header.height,
        })?;

        source.seek(header.pixel_offset).map_err(|err| {
            log::error!("bitmap seek to {} failed: {:?}", header.pixel_offset, err);
            Error::BitmapRead
        })?;

        let mut bgr = vec![0u8; header.row_len()];
        self.write_rows(window, |row, out| {
            source.read_exact(&mut bgr).map_err(|err| {
                log::error!("bitmap row {} read failed: {:?}", row, err);
                Error::BitmapRead
            })?;
            convert_row(&bgr, out);
            Ok(())
        })
    }

    /// Open a bitmap file and stream it to the panel
    ///
    /// See [`show_bitmap`](Self::show_bitmap).
    #[cfg(feature = "std")]
    pub fn show_bitmap_file<P: AsRef<std::path::Path>>(&mut self, path: P, x: u16, y: u16) -> DisplayResult<I> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| {
            log::error!("cannot open bitmap {}: {:?}", path.display(), err);
            Error::BitmapRead
        })?;
        let mut source = IoSource::new(std::io::BufReader::new(file));
        self.show_bitmap(&mut source, x, y)
    }
}
