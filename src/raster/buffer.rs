//! In-memory pixel buffer.

use crate::color::Rgb;

use super::PixelSink;

/// An owned width × height RGB pixel buffer.
///
/// The sink used for headless rendering and tests. Callers that present
/// frames can copy its row-major pixels to whatever surface they manage.
pub struct BufferSink {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl BufferSink {
    /// Creates a buffer cleared to black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrites every pixel with `color`.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// The color at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(self.pixels[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

impl PixelSink for BufferSink {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(sink: &BufferSink) -> usize {
        sink.pixels().iter().filter(|p| **p != Rgb::BLACK).count()
    }

    #[test]
    fn pixels_round_trip() {
        let mut sink = BufferSink::new(4, 4);
        sink.set_pixel(2, 1, Rgb::new(10, 20, 30));
        assert_eq!(sink.pixel(2, 1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(sink.pixel(1, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn out_of_bounds_access_is_harmless() {
        let mut sink = BufferSink::new(4, 4);
        sink.set_pixel(-1, 0, Rgb::WHITE);
        sink.set_pixel(4, 0, Rgb::WHITE);
        sink.set_pixel(0, 4, Rgb::WHITE);

        assert_eq!(painted(&sink), 0);
        assert_eq!(sink.pixel(-1, 0), None);
        assert_eq!(sink.pixel(0, 4), None);
    }

    #[test]
    fn clear_overwrites_every_pixel() {
        let mut sink = BufferSink::new(3, 2);
        sink.clear(Rgb::CYAN);
        assert!(sink.pixels().iter().all(|p| *p == Rgb::CYAN));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut sink = BufferSink::new(10, 10);
        sink.draw_line(1, 1, 5, 4, Rgb::WHITE);

        assert_eq!(sink.pixel(1, 1), Some(Rgb::WHITE));
        assert_eq!(sink.pixel(5, 4), Some(Rgb::WHITE));
        // One pixel per step along the major axis.
        assert_eq!(painted(&sink), 5);
    }

    #[test]
    fn horizontal_and_single_pixel_lines() {
        let mut sink = BufferSink::new(12, 12);
        sink.draw_line(2, 3, 6, 3, Rgb::WHITE);
        for x in 2..=6 {
            assert_eq!(sink.pixel(x, 3), Some(Rgb::WHITE));
        }

        sink.draw_line(9, 9, 9, 9, Rgb::CYAN);
        assert_eq!(sink.pixel(9, 9), Some(Rgb::CYAN));
    }

    #[test]
    fn polygon_fill_covers_the_interior() {
        let mut sink = BufferSink::new(8, 8);
        sink.fill_polygon(&[(0, 0), (4, 0), (0, 4)], Rgb::WHITE);

        assert_eq!(sink.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(sink.pixel(4, 0), Some(Rgb::WHITE));
        assert_eq!(sink.pixel(0, 4), Some(Rgb::WHITE));
        assert_eq!(sink.pixel(1, 1), Some(Rgb::WHITE));
        assert_eq!(sink.pixel(4, 4), Some(Rgb::BLACK));
        assert_eq!(painted(&sink), 15);
    }

    #[test]
    fn polygon_fill_needs_three_points() {
        let mut sink = BufferSink::new(8, 8);
        sink.fill_polygon(&[(0, 0), (4, 4)], Rgb::WHITE);
        assert_eq!(painted(&sink), 0);
    }
}
