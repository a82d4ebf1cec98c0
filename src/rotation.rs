//! Coordinate and orientation model
//!
//! The panel's physical pixel origin does not line up with the controller's
//! memory origin, so every logical coordinate is shifted by an offset before
//! it is written to the address registers. The offset depends on the
//! orientation: portrait rotations (0 and 180) use one pair, landscape
//! rotations (90 and 270) use the swapped pair and swapped width/height.
//!
//! [`Geometry`] bundles the logical size and the offset for the active
//! rotation. It is only ever rebuilt as a whole from the [`Config`] tables,
//! so size and offset cannot drift apart.
//!
//! ## Example
//!
//! ```
//! use tft_raster::{Builder, Dimensions, Rotation, rotation::Geometry};
//!
//! let config = match Builder::new()
//!     .dimensions(Dimensions { width: 240, height: 320 })
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let portrait = Geometry::new(&config, Rotation::Rotate0);
//! assert_eq!((portrait.width, portrait.height), (240, 320));
//! assert_eq!(portrait.to_address(5, 5), Some((57, 45)));
//!
//! let landscape = Geometry::new(&config, Rotation::Rotate90);
//! assert_eq!((landscape.width, landscape.height), (320, 240));
//! assert_eq!(landscape.to_address(5, 5), Some((45, 57)));
//! ```

use crate::config::{Config, Offset, Rotation};

/// Logical panel size and address offset for one rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Active rotation
    pub rotation: Rotation,
    /// Logical width in pixels
    pub width: u16,
    /// Logical height in pixels
    pub height: u16,
    /// Offset added to logical coordinates
    pub offset: Offset,
}

impl Geometry {
    /// Look up the geometry for `rotation` in the configuration tables
    pub fn new(config: &Config, rotation: Rotation) -> Self {
        let dims = config.rotated_dimensions(rotation);
        Self {
            rotation,
            width: dims.width,
            height: dims.height,
            offset: config.offset(rotation),
        }
    }

    /// Whether a logical coordinate lies on the panel
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    /// Translate a logical coordinate into controller address space
    ///
    /// Returns `None` if the coordinate is negative or the shifted value does
    /// not fit a 16-bit register. No bounds check against the panel size is
    /// made here; that is the caller's clipping decision.
    pub fn to_address(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let ax = u16::try_from(x).ok()?.checked_add(self.offset.x)?;
        let ay = u16::try_from(y).ok()?.checked_add(self.offset.y)?;
        Some((ax, ay))
    }

    /// Clip a horizontal span `[x0, x1]` on row `y` to the panel
    ///
    /// Endpoints may be given in either order. Returns the ordered, clipped
    /// span or `None` if nothing of it is visible.
    pub fn clip_span(&self, x0: i32, x1: i32, y: i32) -> Option<(i32, i32)> {
        if y < 0 || y >= i32::from(self.height) {
            return None;
        }
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let lo = lo.max(0);
        let hi = hi.min(i32::from(self.width) - 1);
        (lo <= hi).then_some((lo, hi))
    }

    /// Clip a rectangle to the panel, normalizing corner order
    pub fn clip_rect(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(i32::from(self.width) - 1);
        let bottom = bottom.min(i32::from(self.height) - 1);
        (left <= right && top <= bottom).then_some((left, top, right, bottom))
    }
}
