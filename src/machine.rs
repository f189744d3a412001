// Collaborator core contract
//
// The viewer never executes instructions itself. Whatever core it visualizes
// is driven through this trait: load once, step by cycle or by frame, expose
// a frame buffer snapshot, and accept key transitions.

use crate::display::FrameBuffer;
use crate::error::CoreResult;

/// An instruction-execution core the viewer can drive
///
/// All calls happen on the event-loop thread. `load` is called exactly once,
/// before `cycle`, `frame_advance` or `frame_buffer`; the key calls may arrive
/// at any time.
pub trait Chip8Core {
    /// Initialize the core
    fn load(&mut self) -> CoreResult;

    /// Execute one instruction
    fn cycle(&mut self) -> CoreResult;

    /// Execute one display frame's worth of instructions
    fn frame_advance(&mut self) -> CoreResult;

    /// Snapshot of the current frame buffer
    fn frame_buffer(&self) -> FrameBuffer;

    /// A key was pressed
    fn key_down(&mut self, code: u32) -> CoreResult;

    /// A key was released
    fn key_up(&mut self, code: u32) -> CoreResult;
}

impl<C: Chip8Core + ?Sized> Chip8Core for Box<C> {
    fn load(&mut self) -> CoreResult {
        (**self).load()
    }

    fn cycle(&mut self) -> CoreResult {
        (**self).cycle()
    }

    fn frame_advance(&mut self) -> CoreResult {
        (**self).frame_advance()
    }

    fn frame_buffer(&self) -> FrameBuffer {
        (**self).frame_buffer()
    }

    fn key_down(&mut self, code: u32) -> CoreResult {
        (**self).key_down(code)
    }

    fn key_up(&mut self, code: u32) -> CoreResult {
        (**self).key_up(code)
    }
}
