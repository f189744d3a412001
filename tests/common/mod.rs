// Common test doubles for the scheduler and renderer integration tests
//
// - `RecordingCore` logs every call it receives and serves a fixed frame buffer
// - `RecordingSurface` logs every fill and tracks foreground coverage

#![allow(dead_code)]

use chip8_display::{Chip8Core, Color, CoreResult, DisplaySurface, FrameBuffer};

/// One call received by `RecordingCore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Load,
    Cycle,
    FrameAdvance,
    KeyDown(u32),
    KeyUp(u32),
}

/// Core that records calls and returns a configurable frame buffer
pub struct RecordingCore {
    pub calls: Vec<Call>,
    pub buffer: FrameBuffer,
    pub fail_load: bool,
    pub fail_frame_advance: bool,
}

impl RecordingCore {
    pub fn new() -> Self {
        Self::with_buffer(FrameBuffer::blank())
    }

    pub fn with_buffer(buffer: FrameBuffer) -> Self {
        Self {
            calls: Vec::new(),
            buffer,
            fail_load: false,
            fail_frame_advance: false,
        }
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }
}

impl Chip8Core for RecordingCore {
    fn load(&mut self) -> CoreResult {
        self.calls.push(Call::Load);
        if self.fail_load {
            return Err("program image missing".into());
        }
        Ok(())
    }

    fn cycle(&mut self) -> CoreResult {
        self.calls.push(Call::Cycle);
        Ok(())
    }

    fn frame_advance(&mut self) -> CoreResult {
        self.calls.push(Call::FrameAdvance);
        if self.fail_frame_advance {
            return Err("stack overflow".into());
        }
        Ok(())
    }

    fn frame_buffer(&self) -> FrameBuffer {
        self.buffer.clone()
    }

    fn key_down(&mut self, code: u32) -> CoreResult {
        self.calls.push(Call::KeyDown(code));
        Ok(())
    }

    fn key_up(&mut self, code: u32) -> CoreResult {
        self.calls.push(Call::KeyUp(code));
        Ok(())
    }
}

/// A rectangle filled on a `RecordingSurface`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub color: Color,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Surface that records fills instead of drawing
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub fills: Vec<Fill>,
    color: Color,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fills: Vec::new(),
            color: Color::rgb(0),
        }
    }

    /// Fills in the given colour
    pub fn fills_in(&self, color: Color) -> Vec<Fill> {
        self.fills
            .iter()
            .copied()
            .filter(|f| f.color == color)
            .collect()
    }

    /// Total area filled in the given colour
    pub fn area_in(&self, color: Color) -> u64 {
        self.fills_in(color)
            .iter()
            .map(|f| f.width as u64 * f.height as u64)
            .sum()
    }
}

impl DisplaySurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.fills.push(Fill {
            color: self.color,
            x,
            y,
            width,
            height,
        });
    }
}

/// Packed-row buffer with only row 0 set
pub fn packed_row0(value: u64) -> FrameBuffer {
    let mut rows = vec![0u64; 32];
    rows[0] = value;
    FrameBuffer::PackedRows(rows)
}

/// Deterministic pseudo-random packed rows
pub fn scrambled_rows(seed: u64) -> Vec<u64> {
    let mut state = seed | 1;
    (0..32)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}
