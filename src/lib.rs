#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Incremental Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and
//! repeatedly multiplies it by itself, measuring how quickly that
//! number goes to infinity.  This "velocity" is the number used to
//! render the image.
//!
//! This crate renders that image one scanline at a time.  The engine
//! owns a viewport (a rectangle on the complex plane) and a frame
//! buffer (a rectangle of pixels); a background worker asks the
//! engine to paint one row per tick, so the thread that owns the
//! screen never waits for more than one row's worth of arithmetic.
//! Panning or zooming the viewport marks the frame stale, and the
//! worker starts over from row zero on its next tick.

extern crate itertools;
extern crate num;

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod engine;
pub mod errors;
pub mod escape;
pub mod framebuffer;
pub mod viewport;
pub mod worker;

pub use engine::{Command, Mandelbrot};
pub use errors::EngineError;
pub use worker::{RenderWorker, ScanlineRenderer};
