//! Rasterization of lines, rectangles, circles and polygons
//!
//! The geometry is computed on the fly with integer arithmetic only; there is
//! no framebuffer. Outlines are emitted as single pixels, filled shapes as
//! horizontal spans, and each span becomes one window plus one burst.
//!
//! The stepping algorithms are exposed as plain iterators ([`Line`],
//! [`CircleSteps`], [`PolygonSpans`]) so they can be inspected without a
//! panel attached.
//!
//! ## Example
//!
//! ```
//! use tft_raster::raster::Line;
//!
//! let points: Vec<_> = Line::new((0, 0), (3, 1)).collect();
//! assert_eq!(points, [(0, 0), (1, 0), (2, 1), (3, 1)]);
//! ```

use alloc::vec::Vec;

use crate::color::Color;
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Integer Bresenham line from one point to another, both inclusive
///
/// The error term is kept in `i64`, so endpoints anywhere in the `i32` plane
/// are fine.
#[derive(Clone, Debug)]
pub struct Line {
    x: i32,
    y: i32,
    end: (i32, i32),
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl Line {
    /// Create a line between two points
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        let dx = i64::from(end.0.abs_diff(start.0));
        let dy = i64::from(end.1.abs_diff(start.1));
        Self {
            x: start.0,
            y: start.1,
            end,
            dx,
            dy,
            sx: if start.0 < end.0 { 1 } else { -1 },
            sy: if start.1 < end.1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if point == self.end {
            self.done = true;
            return Some(point);
        }
        let err2 = self.err * 2;
        if err2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if err2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

/// Midpoint circle steps for one octant
///
/// Yields `(x, y)` with `x >= y`, starting at `(radius, 0)`. Every other
/// octant is a sign/swap mirror of these points.
#[derive(Clone, Debug)]
pub struct CircleSteps {
    x: i32,
    y: i32,
    err: i32,
}

impl CircleSteps {
    /// Start stepping a circle of `radius`
    pub fn new(radius: i32) -> Self {
        Self {
            x: radius,
            y: 0,
            err: 0,
        }
    }
}

impl Iterator for CircleSteps {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x < self.y {
            return None;
        }
        let step = (self.x, self.y);
        self.y += 1;
        self.err += 1 + 2 * self.y;
        if 2 * (self.err - self.x) + 1 > 0 {
            self.x -= 1;
            self.err += 1 - 2 * self.x;
        }
        Some(step)
    }
}

/// The eight octant mirrors of a circle step around `center`
pub fn octant_points(center: (i32, i32), (x, y): (i32, i32)) -> [(i32, i32); 8] {
    let (cx, cy) = center;
    [
        (cx + x, cy + y),
        (cx - x, cy + y),
        (cx + x, cy - y),
        (cx - x, cy - y),
        (cx + y, cy + x),
        (cx - y, cy + x),
        (cx + y, cy - x),
        (cx - y, cy - x),
    ]
}

/// Horizontal spans `(x0, x1, y)` covering a circle step
///
/// Two spans at `±y` reach out to `±x`, two spans at `±x` reach out to `±y`.
pub fn circle_spans(center: (i32, i32), (x, y): (i32, i32)) -> [(i32, i32, i32); 4] {
    let (cx, cy) = center;
    [
        (cx - x, cx + x, cy + y),
        (cx - x, cx + x, cy - y),
        (cx - y, cx + y, cy + x),
        (cx - y, cx + y, cy - x),
    ]
}

/// X coordinates where the edges of `vertices` cross scan row `y`, ascending
///
/// Each edge covers the half-open row range `[y_low, y_high)` of its
/// endpoints, so a shared vertex is counted once and horizontal edges are
/// skipped. The crossing is truncated toward zero.
pub fn scanline_intersections(vertices: &[(i32, i32)], y: i32, out: &mut Vec<i32>) {
    out.clear();
    for (index, &(x1, y1)) in vertices.iter().enumerate() {
        let (x2, y2) = vertices[(index + 1) % vertices.len()];
        let ((xs, ys), (xe, ye)) = if y1 < y2 {
            ((x1, y1), (x2, y2))
        } else {
            ((x2, y2), (x1, y1))
        };
        if ys <= y && y < ye {
            // (xs * dy + (y - ys) * dx) / dy, all in i64
            let dy = i64::from(ye) - i64::from(ys);
            let dx = i64::from(xe) - i64::from(xs);
            let num = i64::from(xs) * dy + (i64::from(y) - i64::from(ys)) * dx;
            out.push((num / dy) as i32);
        }
    }
    out.sort_unstable();
}

/// Even-odd scanline spans of a polygon, top to bottom
///
/// Yields `(x0, x1, y)` for every intersection pair (0-1, 2-3, ...) on every
/// row from the lowest to the highest vertex.
#[derive(Clone, Debug)]
pub struct PolygonSpans<'a> {
    vertices: &'a [(i32, i32)],
    y: i32,
    max_y: i32,
    crossings: Vec<i32>,
    pair: usize,
}

impl<'a> PolygonSpans<'a> {
    /// Spans for `vertices`; an empty list yields nothing
    pub fn new(vertices: &'a [(i32, i32)]) -> Self {
        let min_y = vertices.iter().map(|v| v.1).min().unwrap_or(0);
        let max_y = vertices.iter().map(|v| v.1).max().unwrap_or(-1);
        let mut spans = Self {
            vertices,
            y: min_y,
            max_y,
            crossings: Vec::new(),
            pair: 0,
        };
        if !vertices.is_empty() {
            scanline_intersections(vertices, min_y, &mut spans.crossings);
        }
        spans
    }
}

impl Iterator for PolygonSpans<'_> {
    type Item = (i32, i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.y <= self.max_y {
            let index = self.pair * 2;
            if index + 1 < self.crossings.len() {
                self.pair += 1;
                return Some((self.crossings[index], self.crossings[index + 1], self.y));
            }
            self.y += 1;
            self.pair = 0;
            if self.y <= self.max_y {
                scanline_intersections(self.vertices, self.y, &mut self.crossings);
            }
        }
        None
    }
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Draw a line with Bresenham's algorithm, both endpoints included
    ///
    /// A line whose bounding box misses the panel sends nothing.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> DisplayResult<I> {
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));
        if x0.max(x1) < 0 || y0.max(y1) < 0 || x0.min(x1) >= width || y0.min(y1) >= height {
            return Ok(());
        }
        for (x, y) in Line::new((x0, y0), (x1, y1)) {
            self.draw_pixel(x, y, color)?;
        }
        Ok(())
    }

    /// Draw a rectangle outline, or fill it through the batched path
    ///
    /// Corners may be given in any order. The outline visits each edge once;
    /// corners are painted twice.
    pub fn draw_rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
        filled: bool,
    ) -> DisplayResult<I> {
        if filled {
            return self.fill_rect(x0, y0, x1, y1, color);
        }
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        // off-panel pixels are skipped anyway, so only walk the visible part
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));
        for x in left.max(0)..=right.min(width - 1) {
            self.draw_pixel(x, top, color)?;
            self.draw_pixel(x, bottom, color)?;
        }
        for y in top.max(0)..=bottom.min(height - 1) {
            self.draw_pixel(left, y, color)?;
            self.draw_pixel(right, y, color)?;
        }
        Ok(())
    }

    /// Draw a circle with the midpoint algorithm
    ///
    /// The outline paints the eight mirrored octant points per step. The
    /// filled variant paints four spans per step; overlapping spans are
    /// painted more than once.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
        filled: bool,
    ) -> DisplayResult<I> {
        for step in CircleSteps::new(radius) {
            if filled {
                for (x0, x1, y) in circle_spans((cx, cy), step) {
                    self.fill_span(x0, x1, y, color)?;
                }
            } else {
                for (x, y) in octant_points((cx, cy), step) {
                    self.draw_pixel(x, y, color)?;
                }
            }
        }
        Ok(())
    }

    /// Draw a closed polygon
    ///
    /// The outline joins consecutive vertices and the last back to the
    /// first. The filled variant uses the even-odd scanline rule.
    ///
    /// # Errors
    ///
    /// Returns `Error::TooFewVertices` for fewer than three vertices, before
    /// anything is drawn.
    pub fn draw_polygon(&mut self, color: Color, filled: bool, vertices: &[(i32, i32)]) -> DisplayResult<I> {
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices {
                provided: vertices.len(),
            });
        }
        if filled {
            for (x0, x1, y) in PolygonSpans::new(vertices) {
                self.fill_span(x0, x1, y, color)?;
            }
        } else {
            for (index, &(x0, y0)) in vertices.iter().enumerate() {
                let (x1, y1) = vertices[(index + 1) % vertices.len()];
                self.draw_line(x0, y0, x1, y1, color)?;
            }
        }
        Ok(())
    }
}
