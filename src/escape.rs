//! The classic escape-time iterator.  Feed it a point on the complex
//! plane and an iteration budget, and it reports whether the point's
//! orbit under `z = z*z + c` left the circle of radius two, and how
//! quickly.  This is the only piece of the engine that does any real
//! arithmetic, and it is a pure function so the renderer can call it
//! from anywhere.

use num::{clamp, Complex};

/// The verdict on a single point: did its orbit escape, and on which
/// iteration.  For points that never escape, `iterations` is the
/// budget that was exhausted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// True if the orbit left the radius-two circle within budget.
    pub escaped: bool,
    /// The 1-based iteration on which escape was detected, or the
    /// full budget if it never was.
    pub iterations: u32,
}

/// Iterate `z = z*z + c` starting from `z = c`, up to `limit` times,
/// testing `|z|^2 >= 4.0` after every step.
pub fn evaluate(c: Complex<f64>, limit: u32) -> Escape {
    let mut z = c;
    for i in 1..=limit {
        z = z * z + c;
        if z.norm_sqr() >= 4.0 {
            return Escape {
                escaped: true,
                iterations: i,
            };
        }
    }
    Escape {
        escaped: false,
        iterations: limit,
    }
}

/// Map a verdict to an RGB pixel.  Points inside the set are black;
/// points outside fade from bright blue (fast escape) down to black,
/// saturating rather than wrapping once `10 * iterations` passes 255.
pub fn color_of(escape: &Escape) -> (u8, u8, u8) {
    if !escape.escaped {
        return (0, 0, 0);
    }
    let blue = clamp(255 - 10 * i64::from(escape.iterations), 0, 255);
    (0, 0, blue as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        for limit in &[1, 30, 1000] {
            let e = evaluate(Complex::new(0.0, 0.0), *limit);
            assert!(!e.escaped);
            assert_eq!(e.iterations, *limit);
        }
    }

    #[test]
    fn two_escapes_immediately() {
        // z = 2, z*z + c = 6, and 36 >= 4 on the very first step.
        let e = evaluate(Complex::new(2.0, 0.0), 50);
        assert!(e.escaped);
        assert_eq!(e.iterations, 1);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let c = Complex::new(-0.75, 0.11);
        let first = evaluate(c, 500);
        for _ in 0..10 {
            assert_eq!(evaluate(c, 500), first);
        }
    }

    #[test]
    fn fast_escapes_are_bright_blue() {
        let e = Escape {
            escaped: true,
            iterations: 1,
        };
        assert_eq!(color_of(&e), (0, 0, 245));
    }

    #[test]
    fn slow_escapes_saturate_to_black() {
        // 255 - 10*30 is negative; it must clamp, not wrap.
        let e = Escape {
            escaped: true,
            iterations: 30,
        };
        assert_eq!(color_of(&e), (0, 0, 0));
    }

    #[test]
    fn interior_points_are_black() {
        let e = Escape {
            escaped: false,
            iterations: 30,
        };
        assert_eq!(color_of(&e), (0, 0, 0));
    }
}
