//! Pixel output and triangle scan conversion.
//!
//! The pipeline draws through the [`PixelSink`] trait, which models the three
//! primitives a display surface offers: plot a pixel, draw a line, fill a
//! convex polygon. [`BufferSink`] is the in-memory implementation used by the
//! tests and by callers that present frames themselves.
//!
//! Triangle filling lives in [`scanline`]; the fill routines only ever talk
//! to a sink through `set_pixel`, so every fill mode works against any
//! surface.

mod buffer;
pub mod scanline;

pub use buffer::BufferSink;

use crate::color::Rgb;

/// Destination surface for rasterizer output.
///
/// Only `set_pixel` is required; `draw_line` and `fill_polygon` have default
/// implementations built on top of it. A sink backed by an OS surface or
/// hardware can override them with native primitives.
pub trait PixelSink {
    /// Writes one pixel. Out-of-range coordinates must be ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb);

    /// Draws a line segment using Bresenham's algorithm.
    ///
    /// The error term tracks how far the plotted pixel has drifted from the
    /// ideal line; once it crosses a threshold the minor axis steps as well,
    /// so the whole walk stays in integer arithmetic.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            // Doubling the error keeps the comparison in integers.
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Fills a convex polygon one scanline at a time.
    ///
    /// Every row covered by the polygon is intersected with its edges and the
    /// span between the leftmost and rightmost crossing is painted. Convexity
    /// guarantees each row holds a single span. Fewer than three points is a
    /// no-op.
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb) {
        if points.len() < 3 {
            return;
        }

        let mut y_min = points[0].1;
        let mut y_max = points[0].1;
        for point in points {
            y_min = y_min.min(point.1);
            y_max = y_max.max(point.1);
        }

        for y in y_min..=y_max {
            let mut span = None;

            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];

                if y0 == y1 {
                    // A horizontal edge on this row contributes both ends.
                    if y0 == y {
                        span = widen(span, x0 as f32);
                        span = widen(span, x1 as f32);
                    }
                    continue;
                }

                let (top_y, bottom_y, top_x, bottom_x) = if y0 < y1 {
                    (y0, y1, x0, x1)
                } else {
                    (y1, y0, x1, x0)
                };
                if y < top_y || y > bottom_y {
                    continue;
                }

                let t = (y - top_y) as f32 / (bottom_y - top_y) as f32;
                span = widen(span, top_x as f32 + t * (bottom_x - top_x) as f32);
            }

            if let Some((left, right)) = span {
                for x in (left.ceil() as i32)..=(right.floor() as i32) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}

fn widen(span: Option<(f32, f32)>, x: f32) -> Option<(f32, f32)> {
    match span {
        Some((left, right)) => Some((left.min(x), right.max(x))),
        None => Some((x, x)),
    }
}
