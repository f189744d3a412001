// Display module - Frame buffer decoding and presentation
//
// This module provides:
// - Canonical 64×32 grid and the decoder for both frame buffer encodings
// - Two-colour palette
// - Surface abstraction and the block renderer (16×16 pixels per cell)
// - Window host using winit + pixels

pub mod decoder;
pub mod grid;
pub mod palette;
pub mod renderer;
pub mod surface;
pub mod window;

pub use decoder::{decode, FrameBuffer};
pub use grid::{Grid, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};
pub use palette::{Color, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
pub use renderer::{DisplayRenderer, CELL_SIZE};
pub use surface::{DisplaySurface, RgbaSurface, SURFACE_HEIGHT, SURFACE_WIDTH};
pub use window::{run_viewer, ViewerWindow, WindowConfig};
