//! Error type shared by the engine's fallible constructors.  The
//! engine itself raises no errors once built; the only things that
//! can go wrong are handing it an impossible geometry or an
//! unrecognized command name.

/// Everything that can go wrong while assembling a render engine.
#[derive(Debug, Fail, PartialEq)]
pub enum EngineError {
    /// The requested viewport rectangle is inverted or degenerate.
    #[fail(
        display = "viewport corners are inverted or degenerate: left {} right {}, top {} bottom {}",
        left, right, top, bottom
    )]
    BadViewport {
        /// Requested left bound.
        left: f64,
        /// Requested top bound.
        top: f64,
        /// Requested right bound.
        right: f64,
        /// Requested bottom bound.
        bottom: f64,
    },

    /// The frame buffer was asked for a zero-area pixel grid.
    #[fail(display = "frame buffer dimensions must be non-zero, got {}x{}", width, height)]
    EmptyFrame {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// A command name did not match any navigation operation.
    #[fail(display = "unknown command {:?}", name)]
    UnknownCommand {
        /// The name that failed to parse.
        name: String,
    },
}
