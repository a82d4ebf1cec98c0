//! Display configuration types and builder

pub use crate::error::BuilderError;

/// Panel dimensions in the native (portrait) orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (columns)
    pub width: u16,
    /// Height in pixels (rows)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Dimensions with width and height exchanged
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Offset added to logical coordinates before addressing controller memory
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Offset {
    /// Horizontal offset in pixels
    pub x: u16,
    /// Vertical offset in pixels
    pub y: u16,
}

impl Offset {
    /// Create a new offset
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Portrait, no rotation
    #[default]
    Rotate0,
    /// Landscape, 90 degrees
    Rotate90,
    /// Portrait, 180 degrees
    Rotate180,
    /// Landscape, 270 degrees
    Rotate270,
}

impl Rotation {
    /// Index into the rotation table (0..=3)
    pub const fn index(self) -> usize {
        match self {
            Self::Rotate0 => 0,
            Self::Rotate90 => 1,
            Self::Rotate180 => 2,
            Self::Rotate270 => 3,
        }
    }

    /// Whether width and height are exchanged relative to the native orientation
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

impl TryFrom<u8> for Rotation {
    type Error = u8;

    /// Map `0..=3` to a rotation; any other value is returned as the error
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Rotate0),
            1 => Ok(Self::Rotate90),
            2 => Ok(Self::Rotate180),
            3 => Ok(Self::Rotate270),
            other => Err(other),
        }
    }
}

/// Default offset for portrait rotations (0 and 180)
pub const DEFAULT_PORTRAIT_OFFSET: Offset = Offset::new(52, 40);

/// Default offset for landscape rotations (90 and 270)
pub const DEFAULT_LANDSCAPE_OFFSET: Offset = Offset::new(40, 52);

/// Default MADCTL bytes, indexed by [`Rotation::index`]
pub const DEFAULT_MADCTL: [u8; 4] = [0x00, 0x60, 0xC0, 0xA0];

/// Display configuration
///
/// This struct holds all configurable parameters for the panel controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native panel dimensions
    pub dimensions: Dimensions,
    /// Rotation applied by [`Display::initialize`](crate::Display::initialize)
    pub rotation: Rotation,
    /// Offset used by rotations 0 and 180
    pub portrait_offset: Offset,
    /// Offset used by rotations 90 and 270
    pub landscape_offset: Offset,
    /// MADCTL byte for each rotation
    pub madctl: [u8; 4],
    /// Whether display inversion is enabled during initialization
    pub invert_colors: bool,
    /// Wait after software reset, in milliseconds
    pub soft_reset_delay_ms: u32,
    /// Wait after sleep-out, in milliseconds
    pub sleep_out_delay_ms: u32,
}

impl Config {
    /// Get the rotated dimensions for a rotation
    pub fn rotated_dimensions(&self, rotation: Rotation) -> Dimensions {
        if rotation.is_landscape() {
            self.dimensions.swapped()
        } else {
            self.dimensions
        }
    }

    /// Get the coordinate offset for a rotation
    pub fn offset(&self, rotation: Rotation) -> Offset {
        if rotation.is_landscape() {
            self.landscape_offset
        } else {
            self.portrait_offset
        }
    }

    /// Get the MADCTL byte for a rotation
    pub fn madctl(&self, rotation: Rotation) -> u8 {
        self.madctl[rotation.index()]
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use tft_raster::{Builder, Dimensions, Offset, Rotation};
///
/// let dims = match Dimensions::new(240, 320) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .rotation(Rotation::Rotate90)
///     .portrait_offset(Offset::new(52, 40))
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.rotated_dimensions(config.rotation).width, 320);
/// ```
#[must_use]
pub struct Builder {
    /// Native panel dimensions (required)
    dimensions: Option<Dimensions>,
    /// Initial rotation
    rotation: Rotation,
    /// Offset used by rotations 0 and 180
    portrait_offset: Offset,
    /// Offset used by rotations 90 and 270
    landscape_offset: Offset,
    /// MADCTL byte for each rotation
    madctl: [u8; 4],
    /// Whether display inversion is enabled
    invert_colors: bool,
    /// Wait after software reset
    soft_reset_delay_ms: u32,
    /// Wait after sleep-out
    sleep_out_delay_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            rotation: Rotation::Rotate0,
            portrait_offset: DEFAULT_PORTRAIT_OFFSET,
            landscape_offset: DEFAULT_LANDSCAPE_OFFSET,
            madctl: DEFAULT_MADCTL,
            // IPS panels need inversion for correct colors
            invert_colors: true,
            soft_reset_delay_ms: 150,
            sleep_out_delay_ms: 120,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set native panel dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the rotation applied during initialization
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the offset used by portrait rotations
    pub fn portrait_offset(mut self, offset: Offset) -> Self {
        self.portrait_offset = offset;
        self
    }

    /// Set the offset used by landscape rotations
    pub fn landscape_offset(mut self, offset: Offset) -> Self {
        self.landscape_offset = offset;
        self
    }

    /// Set the MADCTL byte for each rotation
    pub fn madctl(mut self, table: [u8; 4]) -> Self {
        self.madctl = table;
        self
    }

    /// Enable or disable display inversion
    pub fn invert_colors(mut self, value: bool) -> Self {
        self.invert_colors = value;
        self
    }

    /// Set the wait after software reset
    pub fn soft_reset_delay_ms(mut self, value: u32) -> Self {
        self.soft_reset_delay_ms = value;
        self
    }

    /// Set the wait after sleep-out
    pub fn sleep_out_delay_ms(mut self, value: u32) -> Self {
        self.sleep_out_delay_ms = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            rotation: self.rotation,
            portrait_offset: self.portrait_offset,
            landscape_offset: self.landscape_offset,
            madctl: self.madctl,
            invert_colors: self.invert_colors,
            soft_reset_delay_ms: self.soft_reset_delay_ms,
            sleep_out_delay_ms: self.sleep_out_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Builder::new()
            .dimensions(Dimensions::new(240, 320).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_rotation_from_index() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::Rotate0));
        assert_eq!(Rotation::try_from(3), Ok(Rotation::Rotate270));
        assert_eq!(Rotation::try_from(4), Err(4));
        assert_eq!(Rotation::try_from(255), Err(255));
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let config = config();
        assert_eq!(
            config.rotated_dimensions(Rotation::Rotate90),
            Dimensions {
                width: 320,
                height: 240
            }
        );
        assert_eq!(
            config.rotated_dimensions(Rotation::Rotate180),
            config.dimensions
        );
    }

    #[test]
    fn test_offsets_follow_orientation() {
        let config = config();
        assert_eq!(config.offset(Rotation::Rotate0), Offset::new(52, 40));
        assert_eq!(config.offset(Rotation::Rotate180), Offset::new(52, 40));
        assert_eq!(config.offset(Rotation::Rotate90), Offset::new(40, 52));
        assert_eq!(config.offset(Rotation::Rotate270), Offset::new(40, 52));
    }

    #[test]
    fn test_default_madctl_table() {
        let config = config();
        assert_eq!(config.madctl(Rotation::Rotate0), 0x00);
        assert_eq!(config.madctl(Rotation::Rotate90), 0x60);
        assert_eq!(config.madctl(Rotation::Rotate180), 0xC0);
        assert_eq!(config.madctl(Rotation::Rotate270), 0xA0);
    }

    #[test]
    fn test_missing_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Dimensions::new(0, 10),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
        assert!(Dimensions::new(10, 0).is_err());
    }
}
