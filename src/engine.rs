// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render engine proper.  A `Mandelbrot` owns the viewport, the
//! frame buffer, and the invalidation flag, all behind one mutex, so
//! the UI thread issuing navigation commands and the worker thread
//! painting scanlines never see each other's half-finished state.
//! Every critical section here is scoped to a single operation: a
//! command is O(1) under the lock, a blit is O(pixels), and a
//! scanline is one row's worth of escape-time arithmetic, the
//! longest hold the engine ever takes.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use itertools::iproduct;

use errors::EngineError;
use escape::{color_of, evaluate};
use framebuffer::{Canvas, FrameBuffer};
use viewport::{Direction, Viewport};

/// The closed set of navigation commands the engine understands.
/// The original design matched on message strings; a tagged enum
/// lets the compiler check the dispatch instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Pan one step toward smaller real values.
    MoveLeft,
    /// Pan one step toward larger real values.
    MoveRight,
    /// Pan one step toward smaller imaginary values.
    MoveUp,
    /// Pan one step toward larger imaginary values.
    MoveDown,
    /// Shrink the viewport about its center.
    ZoomIn,
    /// Grow the viewport about its center.
    ZoomOut,
    /// Restore the home view.
    Reset,
}

impl FromStr for Command {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Command, EngineError> {
        match s {
            "move-left" => Ok(Command::MoveLeft),
            "move-right" => Ok(Command::MoveRight),
            "move-up" => Ok(Command::MoveUp),
            "move-down" => Ok(Command::MoveDown),
            "zoom-in" => Ok(Command::ZoomIn),
            "zoom-out" => Ok(Command::ZoomOut),
            "reset" => Ok(Command::Reset),
            _ => Err(EngineError::UnknownCommand {
                name: s.to_string(),
            }),
        }
    }
}

/// Everything the engine lock protects: the visible rectangle, the
/// pixels rendered from it, and the flag that says the former has
/// changed out from under the latter.
#[derive(Debug)]
struct State {
    viewport: Viewport,
    buffer: FrameBuffer,
    invalid: bool,
}

/// The shared render engine.  Create one per widget; the UI thread
/// calls `apply` and `draw`, the worker calls `draw_line` through its
/// tick, and the single internal mutex keeps them honest.
#[derive(Debug)]
pub struct Mandelbrot {
    width: usize,
    height: usize,
    state: Mutex<State>,
    redraw: AtomicBool,
}

impl Mandelbrot {
    /// Build an engine whose frame buffer matches the widget's pixel
    /// bounds.  The engine starts invalid, so the first worker tick
    /// begins rendering at row zero.
    pub fn new(width: usize, height: usize) -> Result<Mandelbrot, EngineError> {
        Ok(Mandelbrot {
            width,
            height,
            state: Mutex::new(State {
                viewport: Viewport::default(),
                buffer: FrameBuffer::new(width, height)?,
                invalid: true,
            }),
            redraw: AtomicBool::new(false),
        })
    }

    /// Width of the frame buffer in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the frame buffer in pixels; also the number of
    /// scanlines in a full render pass.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Apply one navigation command to the viewport and mark the
    /// frame stale.  Every viewport mutation goes through here so the
    /// dirtying stays consistent.
    pub fn apply(&self, command: Command) {
        let mut state = self.state.lock().unwrap();
        match command {
            Command::MoveLeft => state.viewport.pan(Direction::Left),
            Command::MoveRight => state.viewport.pan(Direction::Right),
            Command::MoveUp => state.viewport.pan(Direction::Up),
            Command::MoveDown => state.viewport.pan(Direction::Down),
            Command::ZoomIn => state.viewport.zoom_in(),
            Command::ZoomOut => state.viewport.zoom_out(),
            Command::Reset => state.viewport.reset(),
        }
        state.invalid = true;
        debug!("{:?} -> viewport {:?}", command, state.viewport);
    }

    /// A copy of the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.state.lock().unwrap().viewport
    }

    /// True if the frame no longer matches the viewport and rendering
    /// must restart from row zero.
    pub fn is_invalid(&self) -> bool {
        self.state.lock().unwrap().invalid
    }

    /// Set or clear the invalidation flag.  The scheduling
    /// collaborator clears it at the top of a fresh render pass.
    pub fn set_invalidation_status(&self, invalid: bool) {
        self.state.lock().unwrap().invalid = invalid;
    }

    /// Render one scanline: evaluate every column of row `y` against
    /// the current viewport and paint the results.  Rows outside the
    /// frame are a silent no-op, not an error.  On completion the
    /// redraw signal is raised so the UI knows fresh pixels exist.
    pub fn draw_line(&self, y: usize, iterations: u32) {
        {
            let mut state = self.state.lock().unwrap();
            if y >= self.height {
                return;
            }
            let viewport = state.viewport;
            for x in 0..self.width {
                let c = viewport.point_at(x, y, self.width, self.height);
                state.buffer.set_pixel(x, y, color_of(&evaluate(c, iterations)));
            }
        }
        trace!("rendered scanline {}", y);
        self.redraw.store(true, Ordering::Release);
    }

    /// Consume the redraw signal.  Returns true exactly once per
    /// batch of newly rendered rows; the UI polls this to decide
    /// whether to blit.
    pub fn take_redraw(&self) -> bool {
        self.redraw.swap(false, Ordering::AcqRel)
    }

    /// Copy the rendered frame into `canvas` with its top-left corner
    /// at `position`, clipping to the canvas bounds.  Both grids stay
    /// locked for the duration of the copy, engine first, so a
    /// half-written scanline can never reach the screen.
    pub fn draw(&self, canvas: &Canvas, position: (usize, usize)) {
        let state = self.state.lock().unwrap();
        let mut target = canvas.lock();
        for (y, x) in iproduct!(0..self.height, 0..self.width) {
            if let Some(pixel) = state.buffer.pixel(x, y) {
                target.set_pixel(position.0 + x, position.1 + y, pixel);
            }
        }
    }
}
