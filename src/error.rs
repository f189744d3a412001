// Error types
//
// Every failure the viewer can surface lives here so the scheduler, the
// decoder and the window host share one vocabulary.

use std::fmt;
use thiserror::Error;

/// Opaque error returned by a collaborator core
pub type CoreFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by every [`Chip8Core`](crate::machine::Chip8Core) call
pub type CoreResult<T = ()> = Result<T, CoreFailure>;

/// Frame buffer could not be turned into a grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame buffer does not have exactly 32 rows
    #[error("frame buffer has {found} rows, expected {expected}")]
    RowCount {
        /// Rows a frame buffer must have
        expected: usize,
        /// Rows actually present
        found: usize,
    },

    /// A bit-plane row does not have exactly 64 cells
    #[error("bit-plane row {row} has {found} cells, expected {expected}")]
    RowWidth {
        /// Offending row index
        row: usize,
        /// Cells a row must have
        expected: usize,
        /// Cells actually present
        found: usize,
    },

    /// A serialized frame buffer named an encoding we do not know
    #[error("unrecognized frame buffer encoding: {0}")]
    UnrecognizedEncoding(String),

    /// A serialized frame buffer could not be parsed at all
    #[error("malformed frame buffer snapshot: {0}")]
    Malformed(String),
}

/// A periodic trigger could not be registered or cancelled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// `start()` was called while the loop is already running
    #[error("scheduler is already running")]
    AlreadyRunning,

    /// The handle was minted by a different scheduler
    #[error("loop handle belongs to scheduler {handle_owner}, not {scheduler}")]
    ForeignHandle {
        /// Scheduler that minted the handle
        handle_owner: u64,
        /// Scheduler the handle was passed to
        scheduler: u64,
    },

    /// A zero interval or zero refresh rate cannot be scheduled
    #[error("invalid cadence: {0}")]
    InvalidCadence(&'static str),
}

/// Which collaborator call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCall {
    /// `load()`
    Load,
    /// `cycle()`
    Cycle,
    /// `frame_advance()`
    FrameAdvance,
    /// `key_down(code)`
    KeyDown(u32),
    /// `key_up(code)`
    KeyUp(u32),
}

impl fmt::Display for CoreCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreCall::Load => write!(f, "load"),
            CoreCall::Cycle => write!(f, "cycle"),
            CoreCall::FrameAdvance => write!(f, "frame_advance"),
            CoreCall::KeyDown(code) => write!(f, "key_down({})", code),
            CoreCall::KeyUp(code) => write!(f, "key_up({})", code),
        }
    }
}

/// A collaborator call failed
#[derive(Error, Debug)]
#[error("core call `{call}` failed: {source}")]
pub struct CoreCallError {
    /// The call that failed
    pub call: CoreCall,
    /// Whatever the core reported
    #[source]
    pub source: CoreFailure,
}

impl CoreCallError {
    /// Wrap a collaborator failure
    pub fn new(call: CoreCall, source: CoreFailure) -> Self {
        Self { call, source }
    }
}

/// Why `start()` did not enter the running state
#[derive(Error, Debug)]
pub enum StartError {
    /// The collaborator failed to load
    #[error(transparent)]
    Core(#[from] CoreCallError),

    /// The periodic triggers could not be registered
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Reading or interpreting the configuration file failed
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be produced
    #[error("serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A colour string is not `#RRGGBB`
    #[error("invalid colour {0:?}, expected #RRGGBB")]
    Color(String),
}

/// The window host could not be brought up
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The winit event loop failed
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// The pixel buffer could not be created
    #[error("pixel buffer error: {0}")]
    Pixels(#[from] pixels::Error),

    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scheduler refused to start
    #[error(transparent)]
    Start(#[from] StartError),
}
