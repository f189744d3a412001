// CHIP-8 Display Library
// Presentation and timing frontend for a CHIP-8 style instruction core

// Public modules
pub mod config;
pub mod demo;
pub mod display;
pub mod error;
pub mod input;
pub mod machine;
pub mod scheduler;

// Re-export main types for convenience
pub use config::ViewerConfig;
pub use demo::PatternCore;
pub use display::{
    decode, run_viewer, Color, DisplayRenderer, DisplaySurface, FrameBuffer, Grid, RgbaSurface,
    WindowConfig,
};
pub use error::{
    ConfigError, CoreCall, CoreCallError, CoreResult, DecodeError, SchedulerError, StartError,
    ViewerError,
};
pub use input::{InputBridge, KeyEvent, KeyTransition};
pub use machine::Chip8Core;
pub use scheduler::{
    CoreErrorPolicy, LoopHandle, LoopScheduler, LoopTiming, SchedulerState, Stepping, Tick,
    TickStats,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that all components can be instantiated
        let _grid = Grid::new();
        let _renderer = DisplayRenderer::new();
        let _timing = LoopTiming::new();
        let _config = ViewerConfig::default();
        let _scheduler =
            LoopScheduler::new(PatternCore::new(), LoopTiming::new(), DisplayRenderer::new());
    }
}
