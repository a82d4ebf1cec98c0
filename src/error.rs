//! Error types for the driver
//!
//! - [`BuilderError`]: the configuration was incomplete or invalid
//! - [`Error`]: a drawing or protocol call failed
//! - [`InterfaceError`](crate::interface::InterfaceError): the bus or a pin failed
//!
//! Argument and format errors are raised before anything is sent to the panel.
//! Transport errors are never retried and reach the caller unmodified inside
//! [`Error::Interface`].
//!
//! ## Example
//!
//! ```
//! use tft_raster::{Builder, BuilderError, Dimensions};
//!
//! // No dimensions given
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(0, 320);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Errors returned by [`Display`](crate::Display) operations
///
/// Generic over the interface so the transport's own error type survives.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// The transport failed; nothing is retried
    Interface(I::Error),
    /// Rotation index outside `0..=3`
    InvalidRotation {
        /// Requested rotation index
        value: u8,
    },
    /// Polygon with fewer than three vertices
    TooFewVertices {
        /// Number of vertices supplied
        provided: usize,
    },
    /// Bitmap pixel depth other than 24 bits
    UnsupportedBitDepth {
        /// Bits per pixel found in the header
        bits: u16,
    },
    /// Bitmap header describes an image that cannot be drawn
    ///
    /// Width or height is not positive, or the target window does not fit
    /// the 16-bit address registers.
    InvalidBitmapHeader {
        /// Width field from the header
        width: i32,
        /// Height field from the header
        height: i32,
    },
    /// Reading from the bitmap source failed or ended early
    BitmapRead,
    /// Pixel data written after a memory-write did not match the active window
    BurstLengthMismatch {
        /// Bytes declared by the active window
        expected: usize,
        /// Bytes actually written
        provided: usize,
    },
    /// A coordinate plus the panel offset does not fit a 16-bit address
    CoordinateOverflow {
        /// Logical X coordinate
        x: i32,
        /// Logical Y coordinate
        y: i32,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(err) => write!(f, "Interface error: {err:?}"),
            Self::InvalidRotation { value } => {
                write!(f, "Invalid rotation {value}, expected 0..=3")
            }
            Self::TooFewVertices { provided } => {
                write!(f, "Polygon needs at least 3 vertices, got {provided}")
            }
            Self::UnsupportedBitDepth { bits } => {
                write!(f, "Unsupported bitmap depth: {bits} bpp (only 24 bpp)")
            }
            Self::InvalidBitmapHeader { width, height } => {
                write!(f, "Invalid bitmap header: {width}x{height}")
            }
            Self::BitmapRead => write!(f, "Failed to read bitmap data"),
            Self::BurstLengthMismatch { expected, provided } => {
                write!(
                    f,
                    "Burst length mismatch: window expects {expected} bytes, wrote {provided}"
                )
            }
            Self::CoordinateOverflow { x, y } => {
                write!(f, "Coordinate out of address range: ({x}, {y})")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors from [`Builder::build`](crate::config::Builder::build) and [`Dimensions::new`](crate::config::Dimensions::new)
#[derive(Debug)]
pub enum BuilderError {
    /// [`Builder::dimensions`](crate::config::Builder::dimensions) was never called
    MissingDimensions,
    /// Width or height was zero
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {width}x{height} (both must be non-zero)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
