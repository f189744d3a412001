// Demo core - Built-in collaborator that needs no program
//
// Shows a checkerboard test pattern that scrolls one column to the right per
// frame. While any key is held the pattern is inverted, which makes the key
// path visible on screen.

use crate::display::{FrameBuffer, GRID_HEIGHT, GRID_WIDTH};
use crate::error::CoreResult;
use crate::machine::Chip8Core;
use std::collections::HashSet;

/// Side length of one checkerboard square, in cells
const SQUARE: usize = 4;

/// Test-pattern core
pub struct PatternCore {
    rows: [u64; GRID_HEIGHT],
    held: HashSet<u32>,
    loaded: bool,
    cycles: u64,
}

impl PatternCore {
    /// Create the core; the pattern is drawn on `load()`
    pub fn new() -> Self {
        Self {
            rows: [0; GRID_HEIGHT],
            held: HashSet::new(),
            loaded: false,
            cycles: 0,
        }
    }

    /// Instructions executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether any key is currently held
    pub fn any_key_held(&self) -> bool {
        !self.held.is_empty()
    }

    fn ensure_loaded(&self) -> CoreResult {
        if self.loaded {
            Ok(())
        } else {
            Err("pattern core used before load".into())
        }
    }
}

impl Default for PatternCore {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8Core for PatternCore {
    fn load(&mut self) -> CoreResult {
        for (row, value) in self.rows.iter_mut().enumerate() {
            *value = (0..GRID_WIDTH)
                .filter(|col| (col / SQUARE + row / SQUARE) % 2 == 0)
                .fold(0u64, |acc, col| acc | (1u64 << (GRID_WIDTH - 1 - col)));
        }
        self.loaded = true;
        Ok(())
    }

    fn cycle(&mut self) -> CoreResult {
        self.ensure_loaded()?;
        self.cycles += 1;
        Ok(())
    }

    fn frame_advance(&mut self) -> CoreResult {
        self.ensure_loaded()?;
        for value in self.rows.iter_mut() {
            *value = value.rotate_right(1);
        }
        Ok(())
    }

    fn frame_buffer(&self) -> FrameBuffer {
        let invert = self.any_key_held();
        FrameBuffer::PackedRows(
            self.rows
                .iter()
                .map(|&value| if invert { !value } else { value })
                .collect(),
        )
    }

    fn key_down(&mut self, code: u32) -> CoreResult {
        self.held.insert(code);
        Ok(())
    }

    fn key_up(&mut self, code: u32) -> CoreResult {
        self.held.remove(&code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::decode;

    #[test]
    fn test_steps_fail_before_load() {
        let mut core = PatternCore::new();
        assert!(core.cycle().is_err());
        assert!(core.frame_advance().is_err());
    }

    #[test]
    fn test_pattern_is_half_lit() {
        let mut core = PatternCore::new();
        core.load().unwrap();

        let grid = decode(&core.frame_buffer()).unwrap();
        assert_eq!(grid.popcount(), GRID_WIDTH * GRID_HEIGHT / 2);
        assert!(grid.get(0, 0));
        assert!(!grid.get(0, SQUARE));
    }

    #[test]
    fn test_frame_advance_scrolls_right() {
        let mut core = PatternCore::new();
        core.load().unwrap();
        core.frame_advance().unwrap();

        let grid = decode(&core.frame_buffer()).unwrap();
        assert!(!grid.get(0, 0));
        assert!(grid.get(0, 1));
    }

    #[test]
    fn test_held_key_inverts() {
        let mut core = PatternCore::new();
        core.load().unwrap();

        core.key_down(65).unwrap();
        assert!(!decode(&core.frame_buffer()).unwrap().get(0, 0));

        core.key_up(65).unwrap();
        assert!(decode(&core.frame_buffer()).unwrap().get(0, 0));
    }

    #[test]
    fn test_cycles_are_counted() {
        let mut core = PatternCore::new();
        core.load().unwrap();
        for _ in 0..10 {
            core.cycle().unwrap();
        }
        assert_eq!(core.cycles(), 10);
    }
}
