//! The incremental renderer.  `ScanlineRenderer` is the little state
//! machine that turns repeated ticks into a full frame, one row at a
//! time; `RenderWorker` is the resident background thread that does
//! the ticking, with the explicit stop-and-join contract the original
//! polling thread never had.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use engine::Mandelbrot;

/// How long the worker sleeps between ticks once the frame is
/// complete.  While rows remain it ticks back to back.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// What a tick accomplished.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WorkerState {
    /// A row was rendered; more may remain.
    Rendering,
    /// The frame is complete and the cursor is parked past the last
    /// row until the next invalidation.
    Idle,
}

/// Cursor state for one incremental render pass.  Each call to
/// `tick` renders at most one scanline, so a frame of height `H`
/// costs exactly `H` ticks and no single tick blocks for longer than
/// one row's worth of arithmetic.
#[derive(Debug)]
pub struct ScanlineRenderer {
    cursor: usize,
    max_row: usize,
    iterations: u32,
}

impl ScanlineRenderer {
    /// A renderer that will walk rows `0..max_row` with the given
    /// iteration budget per point.
    pub fn new(max_row: usize, iterations: u32) -> ScanlineRenderer {
        ScanlineRenderer {
            cursor: 0,
            max_row,
            iterations,
        }
    }

    /// The row the next tick will render.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once every row has been rendered and no invalidation has
    /// arrived since.
    pub fn is_idle(&self) -> bool {
        self.cursor >= self.max_row
    }

    /// One scheduling tick.  If the engine went invalid since the
    /// last tick, the pass restarts from row zero; otherwise the next
    /// row is rendered and the cursor advances.  An invalidation that
    /// lands mid-row is picked up here on the following tick, never
    /// by aborting the row in flight.
    pub fn tick(&mut self, engine: &Mandelbrot) -> WorkerState {
        if engine.is_invalid() {
            engine.set_invalidation_status(false);
            self.cursor = 0;
        }

        if self.cursor >= self.max_row {
            return WorkerState::Idle;
        }

        engine.draw_line(self.cursor, self.iterations);
        self.cursor += 1;
        WorkerState::Rendering
    }
}

/// A resident background thread driving a `ScanlineRenderer` against
/// a shared engine.  Dropping the handle without calling `stop`
/// detaches the thread; call `stop` to shut it down and join it.
#[derive(Debug)]
pub struct RenderWorker {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl RenderWorker {
    /// Start the worker.  It ticks continuously while rows remain and
    /// naps briefly once the frame is complete, waking to check for
    /// invalidations and the stop token.
    pub fn spawn(engine: Arc<Mandelbrot>, iterations: u32) -> io::Result<RenderWorker> {
        let stop = Arc::new(AtomicBool::new(false));
        let token = stop.clone();
        let handle = thread::Builder::new()
            .name("scanline-renderer".to_string())
            .spawn(move || {
                info!("render worker up, {} rows per pass", engine.height());
                let mut renderer = ScanlineRenderer::new(engine.height(), iterations);
                while !token.load(Ordering::Acquire) {
                    if renderer.tick(&engine) == WorkerState::Idle {
                        thread::sleep(IDLE_POLL);
                    }
                }
                info!("render worker stopping");
            })?;
        Ok(RenderWorker {
            stop,
            handle,
        })
    }

    /// Signal the worker to finish its current tick and exit, then
    /// join it.
    pub fn stop(self) {
        self.stop.store(true, Ordering::Release);
        if self.handle.join().is_err() {
            warn!("render worker panicked before joining");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Command;
    use std::time::Instant;

    #[test]
    fn a_frame_of_height_h_takes_exactly_h_ticks() {
        let engine = Mandelbrot::new(4, 3).unwrap();
        let mut renderer = ScanlineRenderer::new(engine.height(), 10);
        for row in 0..3 {
            assert_eq!(renderer.cursor(), row);
            assert_eq!(renderer.tick(&engine), WorkerState::Rendering);
        }
        assert_eq!(renderer.tick(&engine), WorkerState::Idle);
        assert!(renderer.is_idle());
    }

    #[test]
    fn idle_ticks_stay_idle_until_invalidated() {
        let engine = Mandelbrot::new(4, 2).unwrap();
        let mut renderer = ScanlineRenderer::new(engine.height(), 10);
        while renderer.tick(&engine) == WorkerState::Rendering {}
        assert_eq!(renderer.tick(&engine), WorkerState::Idle);
        engine.take_redraw();
        assert_eq!(renderer.tick(&engine), WorkerState::Idle);
        // Idle ticks render nothing, so the signal stays down.
        assert!(!engine.take_redraw());
    }

    #[test]
    fn an_invalidation_restarts_the_pass_at_row_zero() {
        let engine = Mandelbrot::new(4, 4).unwrap();
        let mut renderer = ScanlineRenderer::new(engine.height(), 10);
        renderer.tick(&engine);
        renderer.tick(&engine);
        assert_eq!(renderer.cursor(), 2);

        engine.apply(Command::ZoomIn);
        assert_eq!(renderer.tick(&engine), WorkerState::Rendering);
        // The tick that noticed the invalidation rendered row 0 and
        // cleared the flag.
        assert_eq!(renderer.cursor(), 1);
        assert!(!engine.is_invalid());
    }

    #[test]
    fn the_first_tick_clears_the_initial_invalidation() {
        let engine = Mandelbrot::new(4, 4).unwrap();
        let mut renderer = ScanlineRenderer::new(engine.height(), 10);
        assert!(engine.is_invalid());
        renderer.tick(&engine);
        assert!(!engine.is_invalid());
    }

    #[test]
    fn the_worker_renders_in_the_background_and_joins() {
        let engine = Arc::new(Mandelbrot::new(16, 8).unwrap());
        let worker = RenderWorker::spawn(engine.clone(), 30).unwrap();

        // Wait for evidence that at least one row landed.
        let deadline = Instant::now() + Duration::from_secs(10);
        while !engine.take_redraw() {
            assert!(Instant::now() < deadline, "worker never rendered a row");
            thread::sleep(Duration::from_millis(1));
        }
        worker.stop();
    }
}
