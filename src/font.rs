//! 8x8 bitmap font and text drawing
//!
//! A [`Font`] is a sparse table from character to [`Glyph`]. Each glyph is
//! eight row bytes, top to bottom, with the most significant bit as the
//! leftmost column. Characters missing from the table are dropped, not
//! replaced with a placeholder.

use crate::color::Color;
use crate::display::{Display, DisplayResult, Window};
use crate::interface::DisplayInterface;

/// Glyph cell size in pixels, both ways
pub const GLYPH_SIZE: i32 = 8;

/// Eight row bytes, MSB = leftmost column
pub type Glyph = [u8; 8];

/// Sparse character to glyph table
#[derive(Clone, Copy, Debug)]
pub struct Font {
    glyphs: &'static [(char, Glyph)],
}

impl Font {
    /// Wrap a glyph table
    pub const fn new(glyphs: &'static [(char, Glyph)]) -> Self {
        Self { glyphs }
    }

    /// Look up the glyph for `ch`
    pub fn glyph(&self, ch: char) -> Option<&'static Glyph> {
        self.glyphs
            .iter()
            .find(|(key, _)| *key == ch)
            .map(|(_, glyph)| glyph)
    }

    /// Whether the table has a glyph for `ch`
    pub fn contains(&self, ch: char) -> bool {
        self.glyph(ch).is_some()
    }
}

/// Whether column `col` of a glyph row is set
#[inline]
pub fn glyph_bit(row: u8, col: usize) -> bool {
    (row >> (7 - col)) & 1 == 1
}

/// Built-in font: space, digits, uppercase letters and a little punctuation
pub const FONT_8X8: Font = Font::new(GLYPHS_8X8);

const GLYPHS_8X8: &[(char, Glyph)] = &[
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('0', [0x3C, 0x42, 0x46, 0x4A, 0x52, 0x62, 0x3C, 0x00]),
    ('1', [0x18, 0x28, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00]),
    ('2', [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00]),
    ('3', [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00]),
    ('4', [0x0C, 0x14, 0x24, 0x44, 0x7E, 0x04, 0x04, 0x00]),
    ('5', [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00]),
    ('6', [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00]),
    ('7', [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00]),
    ('8', [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00]),
    ('9', [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00]),
    ('A', [0x18, 0x24, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x00]),
    ('B', [0x7C, 0x42, 0x42, 0x7C, 0x42, 0x42, 0x7C, 0x00]),
    ('C', [0x3C, 0x42, 0x40, 0x40, 0x40, 0x42, 0x3C, 0x00]),
    ('D', [0x78, 0x44, 0x42, 0x42, 0x42, 0x44, 0x78, 0x00]),
    ('E', [0x7E, 0x40, 0x40, 0x7C, 0x40, 0x40, 0x7E, 0x00]),
    ('F', [0x7E, 0x40, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x00]),
    ('G', [0x3C, 0x42, 0x40, 0x4E, 0x42, 0x42, 0x3C, 0x00]),
    ('H', [0x42, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00]),
    ('I', [0x38, 0x10, 0x10, 0x10, 0x10, 0x10, 0x38, 0x00]),
    ('J', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x44, 0x38, 0x00]),
    ('K', [0x42, 0x44, 0x48, 0x70, 0x48, 0x44, 0x42, 0x00]),
    ('L', [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7E, 0x00]),
    ('M', [0x42, 0x66, 0x5A, 0x42, 0x42, 0x42, 0x42, 0x00]),
    ('N', [0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x42, 0x00]),
    ('O', [0x3C, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00]),
    ('P', [0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40, 0x40, 0x00]),
    ('Q', [0x3C, 0x42, 0x42, 0x42, 0x4A, 0x44, 0x3A, 0x00]),
    ('R', [0x7C, 0x42, 0x42, 0x7C, 0x48, 0x44, 0x42, 0x00]),
    ('S', [0x3C, 0x42, 0x40, 0x3C, 0x02, 0x42, 0x3C, 0x00]),
    ('T', [0x7C, 0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x00]),
    ('U', [0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00]),
    ('V', [0x42, 0x42, 0x42, 0x42, 0x24, 0x24, 0x18, 0x00]),
    ('W', [0x42, 0x42, 0x42, 0x42, 0x5A, 0x66, 0x42, 0x00]),
    ('X', [0x42, 0x24, 0x18, 0x18, 0x18, 0x24, 0x42, 0x00]),
    ('Y', [0x44, 0x44, 0x28, 0x10, 0x10, 0x10, 0x10, 0x00]),
    ('Z', [0x7E, 0x04, 0x08, 0x10, 0x20, 0x40, 0x7E, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x08, 0x10]),
    (':', [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00]),
    ('!', [0x10, 0x10, 0x10, 0x10, 0x10, 0x00, 0x10, 0x00]),
    ('?', [0x3C, 0x42, 0x02, 0x0C, 0x10, 0x00, 0x10, 0x00]),
    ('/', [0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x00, 0x00]),
];

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Draw one character cell with its top-left corner at `(x, y)`
    ///
    /// Every cell pixel is painted: set bits in `color`, clear bits in
    /// `background`. A character without a glyph draws nothing.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, color: Color, background: Color) -> DisplayResult<I> {
        let Some(glyph) = self.font.glyph(ch) else {
            log::warn!("no glyph for {:?}, skipped", ch);
            return Ok(());
        };

        // nothing to the right or below can be visible; also keeps x + 7 in i32
        if x >= i32::from(self.width()) || y >= i32::from(self.height()) {
            return Ok(());
        }
        let last = GLYPH_SIZE - 1;
        let geometry = self.geometry();
        if geometry.contains(x, y) && geometry.contains(x + last, y + last) {
            // contains() guarantees both corners fit u16
            let window = Window::new(x as u16, y as u16, (x + last) as u16, (y + last) as u16);
            let (fg, bg) = (color.to_be_bytes(), background.to_be_bytes());
            return self.write_rows(window, |row, buf| {
                for (col, pixel) in buf.chunks_exact_mut(2).enumerate() {
                    let bytes = if glyph_bit(glyph[row], col) { fg } else { bg };
                    pixel.copy_from_slice(&bytes);
                }
                Ok(())
            });
        }

        // Partially visible: per pixel, off-panel pixels are skipped
        for (dy, &bits) in (0..).zip(glyph.iter()) {
            for (dx, col) in (0..).zip(0..8) {
                let fill = if glyph_bit(bits, col) { color } else { background };
                self.draw_pixel(x + dx, y + dy, fill)?;
            }
        }
        Ok(())
    }

    /// Draw a string left to right, one 8 px cell per character
    ///
    /// No wrapping or kerning. Characters without a glyph still advance the
    /// cursor, leaving a gap.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, background: Color) -> DisplayResult<I> {
        let mut cursor = x;
        for ch in text.chars() {
            self.draw_char(cursor, y, ch, color, background)?;
            cursor = cursor.saturating_add(GLYPH_SIZE);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MEMORY_WRITE;
    use crate::config::{Builder, Dimensions, Offset};
    use crate::mock::{MockInterface, MockPanel};

    const A: Glyph = [0x18, 0x24, 0x42, 0x42, 0x7E, 0x42, 0x42, 0x00];

    fn panel_display(width: u16, height: u16) -> Display<MockPanel> {
        let config = Builder::new()
            .dimensions(Dimensions::new(width, height).unwrap())
            .portrait_offset(Offset::new(0, 0))
            .build()
            .unwrap();
        Display::new(
            MockPanel::new(usize::from(width), usize::from(height)),
            config,
        )
    }

    fn assert_cell(panel: &MockPanel, x: usize, y: usize, glyph: &Glyph, fg: Color, bg: Color) {
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                let expected = if glyph_bit(*bits, col) { fg } else { bg };
                assert_eq!(panel.pixel(x + col, y + row), Some(expected), "cell ({col}, {row})");
            }
        }
    }

    #[test]
    fn test_builtin_table() {
        assert_eq!(FONT_8X8.glyph('A'), Some(&A));
        assert_eq!(
            FONT_8X8.glyph('B'),
            Some(&[0x7C, 0x42, 0x42, 0x7C, 0x42, 0x42, 0x7C, 0x00])
        );
        for ch in ('0'..='9').chain('A'..='Z').chain([' ', '.', ':', '-']) {
            assert!(FONT_8X8.contains(ch), "missing {ch:?}");
        }
        assert!(!FONT_8X8.contains('a'));
        assert!(!FONT_8X8.contains('\u{e9}'));
    }

    #[test]
    fn test_glyph_bit_order() {
        assert!(glyph_bit(0x80, 0));
        assert!(!glyph_bit(0x80, 1));
        assert!(glyph_bit(0x01, 7));
        assert!(glyph_bit(0x18, 3) && glyph_bit(0x18, 4));
    }

    #[test]
    fn test_draw_char_paints_full_cell() {
        let mut display = panel_display(16, 16);
        display
            .draw_char(4, 3, 'A', Color::WHITE, Color::BLUE)
            .unwrap();
        assert_cell(&display.interface, 4, 3, &A, Color::WHITE, Color::BLUE);
        assert_eq!(display.interface.pixel(3, 3), None);
        assert_eq!(display.interface.pixel(12, 3), None);
    }

    #[test]
    fn test_draw_char_uses_one_window() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 320).unwrap())
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display
            .draw_char(0, 0, 'A', Color::WHITE, Color::BLACK)
            .unwrap();
        let iface = &display.interface;
        assert_eq!(iface.commands.iter().filter(|&&c| c == MEMORY_WRITE).count(), 1);
        let (_, pixels) = iface.command_data.last().unwrap();
        assert_eq!(pixels.len(), 8 * 8 * 2);
        // top row 0x18: columns 3 and 4 lit
        assert_eq!(&pixels[..8], &[0, 0, 0, 0, 0, 0, 0xFF, 0xFF]);
    }

    #[test]
    fn test_partially_visible_char_is_clipped() {
        let mut display = panel_display(16, 16);
        display
            .draw_char(12, -2, 'A', Color::RED, Color::BLACK)
            .unwrap();
        let panel = &display.interface;
        // row 2 of the glyph (0x42) lands on panel row 0
        assert_eq!(panel.pixel(13, 0), Some(Color::RED));
        assert_eq!(panel.pixel(12, 0), Some(Color::BLACK));
        assert_eq!(panel.pixel(15, 0), Some(Color::BLACK));
        // row 4 (0x7E) lands on panel row 2
        assert_eq!(panel.pixel(14, 2), Some(Color::RED));
    }

    #[test]
    fn test_missing_glyph_is_a_noop() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 320).unwrap())
            .build()
            .unwrap();
        let mut display = Display::new(MockInterface::new(), config);
        display
            .draw_char(0, 0, '~', Color::WHITE, Color::BLACK)
            .unwrap();
        assert!(display.interface.commands.is_empty());
    }

    #[test]
    fn test_text_advances_eight_pixels() {
        let mut display = panel_display(40, 8);
        display
            .draw_text(0, 0, "AaB", Color::WHITE, Color::BLACK)
            .unwrap();
        let panel = &display.interface;
        assert_cell(panel, 0, 0, &A, Color::WHITE, Color::BLACK);
        // unmapped 'a' leaves its cell untouched
        for x in 8..16 {
            for y in 0..8 {
                assert_eq!(panel.pixel(x, y), None);
            }
        }
        let b = FONT_8X8.glyph('B').unwrap();
        assert_cell(panel, 16, 0, b, Color::WHITE, Color::BLACK);
    }

    #[test]
    fn test_text_near_coordinate_limit() {
        let mut display = panel_display(16, 16);
        display
            .draw_text(i32::MAX - 3, 0, "AB", Color::WHITE, Color::BLACK)
            .unwrap();
        display
            .draw_char(0, i32::MAX, 'A', Color::WHITE, Color::BLACK)
            .unwrap();
        display
            .draw_char(i32::MIN, i32::MIN, 'A', Color::WHITE, Color::BLACK)
            .unwrap();
        assert_eq!(display.interface.bursts, 0);
    }

    #[test]
    fn test_custom_font() {
        static BLOCK: [(char, Glyph); 1] = [('#', [0xFF; 8])];
        let mut display = panel_display(8, 8);
        display.set_font(Font::new(&BLOCK));
        display
            .draw_text(0, 0, "#A", Color::GREEN, Color::BLACK)
            .unwrap();
        assert_cell(&display.interface, 0, 0, &[0xFF; 8], Color::GREEN, Color::BLACK);
        assert!(display.font().glyph('A').is_none());
    }
}
