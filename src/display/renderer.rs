// Display renderer
//
// Blits a decoded grid onto a surface: clear the whole surface to the
// background, then one filled CELL_SIZE × CELL_SIZE block per lit cell.

use super::grid::Grid;
use super::palette::{Color, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND};
use super::surface::DisplaySurface;

/// Edge length of one cell in surface pixels
pub const CELL_SIZE: u32 = 16;

/// Renders grids with a fixed background/foreground pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRenderer {
    background: Color,
    foreground: Color,
}

impl DisplayRenderer {
    /// Renderer with the default black/white palette
    pub fn new() -> Self {
        Self::with_colors(DEFAULT_BACKGROUND, DEFAULT_FOREGROUND)
    }

    /// Renderer with a custom palette
    pub fn with_colors(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }

    /// Background colour
    pub fn background(&self) -> Color {
        self.background
    }

    /// Foreground colour
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Draw `grid` onto `surface`
    ///
    /// The clear uses the surface's current size so a host that resizes its
    /// surface still gets a full clear.
    pub fn render(&self, grid: &Grid, surface: &mut dyn DisplaySurface) {
        let (width, height) = surface.size();
        surface.set_fill_color(self.background);
        surface.fill_rect(0, 0, width, height);

        surface.set_fill_color(self.foreground);
        for (row, col) in grid.lit_cells() {
            surface.fill_rect(
                CELL_SIZE * col as u32,
                CELL_SIZE * row as u32,
                CELL_SIZE,
                CELL_SIZE,
            );
        }
    }
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new()
    }
}
