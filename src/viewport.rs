//! The viewport is the rectangle on the complex cartesian plane that
//! is currently mapped onto the pixel grid.  It knows how to slide
//! itself around (panning), grow and shrink about its own center
//! (zooming), and translate a pixel coordinate into the complex
//! number that pixel stands for.

use num::Complex;

use errors::EngineError;

/// The axis and sense of a pan operation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Direction {
    /// Slide the visible rectangle toward smaller real values.
    Left,
    /// Slide the visible rectangle toward larger real values.
    Right,
    /// Slide the visible rectangle toward smaller imaginary values.
    Up,
    /// Slide the visible rectangle toward larger imaginary values.
    Down,
}

/// How far one pan step moves, as a fraction of the visible extent.
const PAN_FRACTION: f64 = 0.1;

/// Per-step scale factors for zooming.  Note that they are not exact
/// inverses: zooming in and back out leaves the rectangle at 0.99 of
/// its former size.  That is how the navigation has always behaved
/// and callers should not rely on a round trip being exact.
const ZOOM_IN_FACTOR: f64 = 0.9;
const ZOOM_OUT_FACTOR: f64 = 1.1;

/// The rectangle of the complex plane visible in the widget, stored
/// as its four bounds.  `right > left` and `bottom > top` hold after
/// every navigation operation.  There is deliberately no floor on how
/// small zooming in can make the rectangle; far past the precision of
/// an `f64` the picture degenerates, but the arithmetic stays
/// well-defined.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Smallest visible real value.
    pub left: f64,
    /// Smallest visible imaginary value.
    pub top: f64,
    /// Largest visible real value.
    pub right: f64,
    /// Largest visible imaginary value.
    pub bottom: f64,
}

impl Default for Viewport {
    /// The home view: the 4x4 square centered on the origin, which
    /// comfortably contains the whole Mandelbrot set.
    fn default() -> Viewport {
        Viewport {
            left: -2.0,
            top: -2.0,
            right: 2.0,
            bottom: 2.0,
        }
    }
}

impl Viewport {
    /// Construct a viewport with explicit bounds, rejecting corners
    /// that are inverted or describe an empty rectangle.
    pub fn with_bounds(left: f64, top: f64, right: f64, bottom: f64) -> Result<Viewport, EngineError> {
        if right <= left || bottom <= top {
            return Err(EngineError::BadViewport {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Viewport {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Width of the visible rectangle on the real axis.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the visible rectangle on the imaginary axis.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center of the visible rectangle, as (real, imaginary).
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Slide the rectangle one step in the given direction.  A step
    /// is a tenth of the current extent on that axis, so panning
    /// stays proportionate no matter how deep the zoom.
    pub fn pan(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                let step = self.width() * PAN_FRACTION;
                self.left -= step;
                self.right -= step;
            }
            Direction::Right => {
                let step = self.width() * PAN_FRACTION;
                self.left += step;
                self.right += step;
            }
            Direction::Up => {
                let step = self.height() * PAN_FRACTION;
                self.top -= step;
                self.bottom -= step;
            }
            Direction::Down => {
                let step = self.height() * PAN_FRACTION;
                self.top += step;
                self.bottom += step;
            }
        }
    }

    /// Shrink the rectangle about its center.
    pub fn zoom_in(&mut self) {
        self.scale(ZOOM_IN_FACTOR);
    }

    /// Grow the rectangle about its center.
    pub fn zoom_out(&mut self) {
        self.scale(ZOOM_OUT_FACTOR);
    }

    /// Restore the home view.
    pub fn reset(&mut self) {
        *self = Viewport::default();
    }

    /// Rebuild the four bounds from scaled half-extents around the
    /// unchanged center.
    fn scale(&mut self, factor: f64) {
        let (x, y) = self.center();
        let half_width = self.width() * factor / 2.0;
        let half_height = self.height() * factor / 2.0;
        self.left = x - half_width;
        self.top = y - half_height;
        self.right = x + half_width;
        self.bottom = y + half_height;
    }

    /// Given the column and row of a pixel on an integral grid of the
    /// stated size, return the complex number at the equivalent
    /// location on this rectangle.  Pixel (0, 0) lands exactly on
    /// (left, top).
    pub fn point_at(&self, x: usize, y: usize, width: usize, height: usize) -> Complex<f64> {
        Complex {
            re: self.left + (self.width() / width as f64) * (x as f64),
            im: self.top + (self.height() / height as f64) * (y as f64),
        }
    }
}
