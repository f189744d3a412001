// Input integration tests
// Key transitions forwarded through the scheduler's input bridge

mod common;

use chip8_display::input::key_code;
use chip8_display::*;
use common::{Call, RecordingCore};
use winit::keyboard::{KeyCode, PhysicalKey};

fn scheduler() -> LoopScheduler<RecordingCore> {
    LoopScheduler::new(RecordingCore::new(), LoopTiming::new(), DisplayRenderer::new())
}

#[test]
fn test_scenario_d_down_then_up() {
    let mut sched = scheduler();

    sched.input().on_key_down(65).unwrap();
    sched.input().on_key_up(65).unwrap();

    assert_eq!(sched.core().calls, vec![Call::KeyDown(65), Call::KeyUp(65)]);
}

#[test]
fn test_keys_forwarded_before_start() {
    let mut sched = scheduler();
    sched.input().forward(KeyEvent::down(49)).unwrap();

    assert_eq!(sched.state(), SchedulerState::Idle);
    assert_eq!(sched.core().calls, vec![Call::KeyDown(49)]);
}

#[test]
fn test_arrival_order_preserved_with_repeats() {
    let mut sched = scheduler();
    let events = [
        KeyEvent::down(87),
        KeyEvent::down(87),
        KeyEvent::down(65),
        KeyEvent::up(87),
        KeyEvent::up(65),
    ];

    let mut bridge = sched.input();
    for event in events {
        bridge.forward(event).unwrap();
    }

    assert_eq!(
        sched.core().calls,
        vec![
            Call::KeyDown(87),
            Call::KeyDown(87),
            Call::KeyDown(65),
            Call::KeyUp(87),
            Call::KeyUp(65),
        ]
    );
}

#[test]
fn test_physical_key_a_reaches_core_as_65() {
    let mut sched = scheduler();
    let code = key_code(PhysicalKey::Code(KeyCode::KeyA)).unwrap();

    sched.input().on_key_down(code).unwrap();
    assert_eq!(sched.core().calls, vec![Call::KeyDown(65)]);
}
