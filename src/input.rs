// Input module - Keyboard transitions forwarded to the core
//
// `keyboard` turns winit physical keys into numeric codes, `bridge` hands
// the resulting events to the core.

pub mod bridge;
pub mod keyboard;

pub use bridge::InputBridge;
pub use keyboard::key_code;

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// Key went down (including OS auto-repeat)
    Down,
    /// Key came up
    Up,
}

/// One key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Numeric key code, forwarded unchanged
    pub code: u32,
    /// Press or release
    pub transition: KeyTransition,
}

impl KeyEvent {
    /// A key press
    pub fn down(code: u32) -> Self {
        Self {
            code,
            transition: KeyTransition::Down,
        }
    }

    /// A key release
    pub fn up(code: u32) -> Self {
        Self {
            code,
            transition: KeyTransition::Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_constructors() {
        assert_eq!(KeyEvent::down(65).transition, KeyTransition::Down);
        assert_eq!(KeyEvent::up(65).transition, KeyTransition::Up);
        assert_eq!(KeyEvent::up(65).code, 65);
    }
}
