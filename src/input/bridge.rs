// Input bridge
//
// Forwards key transitions to the core one-for-one, in arrival order. Held
// keys that the OS auto-repeats arrive as repeated downs and are forwarded as
// such; debouncing is the core's business.

use super::{KeyEvent, KeyTransition};
use crate::error::{CoreCall, CoreCallError};
use crate::machine::Chip8Core;

/// Forwards key events to a borrowed core
pub struct InputBridge<'a, C: Chip8Core + ?Sized> {
    core: &'a mut C,
}

impl<'a, C: Chip8Core + ?Sized> InputBridge<'a, C> {
    /// Bridge into `core`
    pub fn new(core: &'a mut C) -> Self {
        Self { core }
    }

    /// Forward a key press
    pub fn on_key_down(&mut self, code: u32) -> Result<(), CoreCallError> {
        self.forward(KeyEvent::down(code))
    }

    /// Forward a key release
    pub fn on_key_up(&mut self, code: u32) -> Result<(), CoreCallError> {
        self.forward(KeyEvent::up(code))
    }

    /// Forward one event exactly once
    ///
    /// A core failure is logged and returned; it is never retried.
    pub fn forward(&mut self, event: KeyEvent) -> Result<(), CoreCallError> {
        let (call, result) = match event.transition {
            KeyTransition::Down => (CoreCall::KeyDown(event.code), self.core.key_down(event.code)),
            KeyTransition::Up => (CoreCall::KeyUp(event.code), self.core.key_up(event.code)),
        };

        result.map_err(|source| {
            let err = CoreCallError::new(call, source);
            log::warn!("{}", err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FrameBuffer;
    use crate::error::CoreResult;

    #[derive(Default)]
    struct KeyLog {
        calls: Vec<CoreCall>,
        reject: Option<u32>,
    }

    impl Chip8Core for KeyLog {
        fn load(&mut self) -> CoreResult {
            Ok(())
        }

        fn cycle(&mut self) -> CoreResult {
            Ok(())
        }

        fn frame_advance(&mut self) -> CoreResult {
            Ok(())
        }

        fn frame_buffer(&self) -> FrameBuffer {
            FrameBuffer::blank()
        }

        fn key_down(&mut self, code: u32) -> CoreResult {
            self.calls.push(CoreCall::KeyDown(code));
            if self.reject == Some(code) {
                return Err("key rejected".into());
            }
            Ok(())
        }

        fn key_up(&mut self, code: u32) -> CoreResult {
            self.calls.push(CoreCall::KeyUp(code));
            Ok(())
        }
    }

    #[test]
    fn test_down_then_up_forwarded_in_order() {
        let mut core = KeyLog::default();
        let mut bridge = InputBridge::new(&mut core);

        bridge.on_key_down(65).unwrap();
        bridge.on_key_up(65).unwrap();

        assert_eq!(core.calls, vec![CoreCall::KeyDown(65), CoreCall::KeyUp(65)]);
    }

    #[test]
    fn test_repeats_are_not_filtered() {
        let mut core = KeyLog::default();
        let mut bridge = InputBridge::new(&mut core);

        for _ in 0..3 {
            bridge.on_key_down(49).unwrap();
        }

        assert_eq!(core.calls, vec![CoreCall::KeyDown(49); 3]);
    }

    #[test]
    fn test_failure_is_reported_once() {
        let mut core = KeyLog {
            reject: Some(81),
            ..KeyLog::default()
        };
        let mut bridge = InputBridge::new(&mut core);

        let err = bridge.on_key_down(81).unwrap_err();
        assert_eq!(err.call, CoreCall::KeyDown(81));
        assert_eq!(core.calls.len(), 1);
    }
}
