//! The pixel grids.  `FrameBuffer` is the plain grid the engine
//! paints into; `Canvas` wraps one in a mutex and stands in for the
//! host toolkit's blit target, whose bitmap must be locked before
//! anything touches it.

use std::sync::{Mutex, MutexGuard};

use errors::EngineError;

/// One pixel, as (red, green, blue).
pub type Pixel = (u8, u8, u8);

/// A width-by-height grid of RGB pixels, stored row-major and
/// initialized to black.
#[derive(Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    /// Allocate a black grid.  Zero-area grids are refused; a widget
    /// with no pixels has nothing to render into.
    pub fn new(width: usize, height: usize) -> Result<FrameBuffer, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyFrame { width, height });
        }
        Ok(FrameBuffer {
            width,
            height,
            pixels: vec![(0, 0, 0); width * height],
        })
    }

    /// Width of the grid in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at (x, y), or `None` outside the grid.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Overwrite the pixel at (x, y).  Writes outside the grid are
    /// ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = pixel;
        }
    }

    /// One full row of pixels.
    pub fn row(&self, y: usize) -> &[Pixel] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Flatten the grid into the `r g b r g b ...` byte layout the
    /// image encoders want.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &(r, g, b) in &self.pixels {
            bytes.push(r);
            bytes.push(g);
            bytes.push(b);
        }
        bytes
    }
}

/// A lockable blit target.  The UI hands one of these to the
/// engine's `draw`; holding the guard returned by `lock` is what the
/// host toolkit would call locking the bitmap, and dropping it is the
/// unlock that happens on every exit path.
#[derive(Debug)]
pub struct Canvas {
    inner: Mutex<FrameBuffer>,
}

impl Canvas {
    /// Allocate a black canvas of the given size.
    pub fn new(width: usize, height: usize) -> Result<Canvas, EngineError> {
        Ok(Canvas {
            inner: Mutex::new(FrameBuffer::new(width, height)?),
        })
    }

    /// Take exclusive access to the canvas pixels until the guard is
    /// dropped.
    pub fn lock(&self) -> MutexGuard<FrameBuffer> {
        self.inner.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffers_are_black() {
        let fb = FrameBuffer::new(4, 3).unwrap();
        assert_eq!(fb.pixel(0, 0), Some((0, 0, 0)));
        assert_eq!(fb.pixel(3, 2), Some((0, 0, 0)));
    }

    #[test]
    fn zero_area_buffers_are_refused() {
        assert!(FrameBuffer::new(0, 10).is_err());
        assert!(FrameBuffer::new(10, 0).is_err());
    }

    #[test]
    fn pixels_round_trip() {
        let mut fb = FrameBuffer::new(4, 3).unwrap();
        fb.set_pixel(2, 1, (0, 0, 245));
        assert_eq!(fb.pixel(2, 1), Some((0, 0, 245)));
        assert_eq!(fb.row(1)[2], (0, 0, 245));
    }

    #[test]
    fn out_of_range_reads_and_writes_are_harmless() {
        let mut fb = FrameBuffer::new(4, 3).unwrap();
        fb.set_pixel(4, 0, (1, 2, 3));
        fb.set_pixel(0, 3, (1, 2, 3));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.pixel(0, 3), None);
    }

    #[test]
    fn rgb_bytes_are_row_major_triples() {
        let mut fb = FrameBuffer::new(2, 2).unwrap();
        fb.set_pixel(1, 0, (9, 8, 7));
        let bytes = fb.to_rgb_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[3..6], &[9, 8, 7]);
    }

    #[test]
    fn canvas_lock_yields_the_grid() {
        let canvas = Canvas::new(2, 2).unwrap();
        canvas.lock().set_pixel(0, 0, (1, 1, 1));
        assert_eq!(canvas.lock().pixel(0, 0), Some((1, 1, 1)));
    }
}
