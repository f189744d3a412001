// Loop scheduler - Decouples machine stepping from display refresh
//
// Two periodic activities share the event-loop thread:
// - a fixed-interval cycle activity that calls `cycle()` on the core
// - a refresh-aligned frame activity that advances the core by a frame (or a
//   single cycle, see `Stepping::PerFrame`), then decodes and renders
//
// The host polls both with the current time. The scheduler never blocks and
// never catches up on missed ticks.

mod timer;

pub use timer::PeriodicTimer;

use crate::display::{decode, DisplayRenderer, DisplaySurface, FrameBuffer};
use crate::error::{
    CoreCall, CoreCallError, CoreFailure, DecodeError, SchedulerError, StartError,
};
use crate::input::InputBridge;
use crate::machine::Chip8Core;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_SCHEDULER_ID: AtomicU64 = AtomicU64::new(1);

/// How the core is stepped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stepping {
    /// `cycle()` on the fixed interval, `frame_advance()` on every refresh
    Split,
    /// One `cycle()` per refresh, no fixed-interval activity
    PerFrame,
}

/// What a failing `cycle()`/`frame_advance()` does to the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreErrorPolicy {
    /// Log, skip the tick, keep running
    Continue,
    /// Log, cancel both activities, go idle
    Halt,
}

/// Cadence of the two activities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    /// Target interval between `cycle()` calls
    pub cycle_interval: Duration,
    /// Shortest interval the host will honour
    pub min_interval: Duration,
    /// Target display refresh rate in Hz
    pub refresh_hz: u32,
    /// How the core is stepped
    pub stepping: Stepping,
    /// Failure policy for stepping calls
    pub on_core_error: CoreErrorPolicy,
}

impl LoopTiming {
    /// 1 ms cycle target, 60 Hz refresh, split stepping, keep running on errors
    pub fn new() -> Self {
        Self {
            cycle_interval: Duration::from_millis(1),
            min_interval: Duration::from_millis(1),
            refresh_hz: 60,
            stepping: Stepping::Split,
            on_core_error: CoreErrorPolicy::Continue,
        }
    }

    /// Set the target cycle interval
    pub fn with_cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = interval;
        self
    }

    /// Set the host's minimum enforced interval
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the refresh rate
    pub fn with_refresh_hz(mut self, hz: u32) -> Self {
        self.refresh_hz = hz;
        self
    }

    /// Set the stepping mode
    pub fn with_stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Set the failure policy
    pub fn with_core_error_policy(mut self, policy: CoreErrorPolicy) -> Self {
        self.on_core_error = policy;
        self
    }

    /// Cycle interval after the host clamp
    pub fn effective_cycle_interval(&self) -> Duration {
        self.cycle_interval.max(self.min_interval)
    }

    /// Duration of one refresh
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.refresh_hz.max(1) as u64)
    }

    fn validate(&self) -> Result<(), SchedulerError> {
        if self.refresh_hz == 0 {
            return Err(SchedulerError::InvalidCadence("refresh rate must be non-zero"));
        }
        if self.frame_duration().is_zero() {
            return Err(SchedulerError::InvalidCadence(
                "refresh rate must be at most 1 MHz",
            ));
        }
        if self.stepping == Stepping::Split && self.effective_cycle_interval().is_zero() {
            return Err(SchedulerError::InvalidCadence("cycle interval must be non-zero"));
        }
        Ok(())
    }
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No activity registered
    Idle,
    /// Both activities registered
    Running,
}

/// Token for a live set of registrations, required by `stop()`
#[derive(Debug, PartialEq, Eq)]
pub struct LoopHandle {
    scheduler: u64,
    generation: u64,
}

/// Outcome of polling one activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The scheduler is idle
    Inactive,
    /// The activity was not due
    NotDue,
    /// The activity ran to completion
    Ran,
    /// The activity was due but failed; the next tick runs normally
    Skipped,
    /// The activity failed and the loop was halted
    Halted,
}

/// Running counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Successful `cycle()` calls
    pub cycles: u64,
    /// Successful `frame_advance()` calls
    pub frame_advances: u64,
    /// Frames rendered
    pub frames: u64,
    /// Frames skipped because the buffer did not decode
    pub skipped_frames: u64,
    /// Failed `cycle()`/`frame_advance()` calls
    pub core_failures: u64,
}

struct Registrations {
    generation: u64,
    cycle: Option<PeriodicTimer>,
    refresh: PeriodicTimer,
}

/// Owns a core and drives it at two independent cadences
pub struct LoopScheduler<C: Chip8Core> {
    id: u64,
    core: C,
    renderer: DisplayRenderer,
    timing: LoopTiming,
    loaded: bool,
    generation: u64,
    active: Option<Registrations>,
    stats: TickStats,
    last_core_error: Option<CoreCallError>,
    bit_planes_noted: bool,
}

impl<C: Chip8Core> LoopScheduler<C> {
    /// Create an idle scheduler; the core is not loaded until `start()`
    pub fn new(core: C, timing: LoopTiming, renderer: DisplayRenderer) -> Self {
        Self {
            id: NEXT_SCHEDULER_ID.fetch_add(1, Ordering::Relaxed),
            core,
            renderer,
            timing,
            loaded: false,
            generation: 0,
            active: None,
            stats: TickStats::default(),
            last_core_error: None,
            bit_planes_noted: false,
        }
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        if self.active.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Whether both activities are registered
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Counters since creation
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    /// Cadence in use
    pub fn timing(&self) -> &LoopTiming {
        &self.timing
    }

    /// Renderer in use
    pub fn renderer(&self) -> &DisplayRenderer {
        &self.renderer
    }

    /// Most recent stepping failure, if any
    pub fn last_core_error(&self) -> Option<&CoreCallError> {
        self.last_core_error.as_ref()
    }

    /// Get reference to the core
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Get mutable reference to the core
    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Give the core back
    pub fn into_core(self) -> C {
        self.core
    }

    /// Key event path into the core
    pub fn input(&mut self) -> InputBridge<'_, C> {
        InputBridge::new(&mut self.core)
    }

    /// Load the core (first start only) and register both activities
    pub fn start(&mut self) -> Result<LoopHandle, StartError> {
        self.start_at(Instant::now())
    }

    /// `start()` with an explicit clock reading
    pub fn start_at(&mut self, now: Instant) -> Result<LoopHandle, StartError> {
        if self.active.is_some() {
            return Err(SchedulerError::AlreadyRunning.into());
        }
        self.timing.validate()?;

        if !self.loaded {
            self.core
                .load()
                .map_err(|source| CoreCallError::new(CoreCall::Load, source))?;
            self.loaded = true;
        }

        self.generation += 1;
        let cycle = match self.timing.stepping {
            Stepping::Split => Some(PeriodicTimer::new(
                self.timing.effective_cycle_interval(),
                now,
            )),
            Stepping::PerFrame => None,
        };
        self.active = Some(Registrations {
            generation: self.generation,
            cycle,
            refresh: PeriodicTimer::new(self.timing.frame_duration(), now),
        });

        log::info!(
            "Scheduler {} running: cycle every {:?}, refresh every {:?}, {:?} stepping",
            self.id,
            self.timing.effective_cycle_interval(),
            self.timing.frame_duration(),
            self.timing.stepping
        );

        Ok(LoopHandle {
            scheduler: self.id,
            generation: self.generation,
        })
    }

    /// Cancel both activities
    ///
    /// Stopping an already stopped handle is a no-op.
    pub fn stop(&mut self, handle: &LoopHandle) -> Result<(), SchedulerError> {
        if handle.scheduler != self.id {
            return Err(SchedulerError::ForeignHandle {
                handle_owner: handle.scheduler,
                scheduler: self.id,
            });
        }

        match &self.active {
            Some(active) if active.generation == handle.generation => {
                self.active = None;
                log::info!("Scheduler {} stopped", self.id);
            }
            _ => log::debug!("Scheduler {}: handle already stopped", self.id),
        }
        Ok(())
    }

    /// Earliest instant at which either activity is due
    pub fn next_deadline(&self) -> Option<Instant> {
        let active = self.active.as_ref()?;
        let refresh = active.refresh.next_due();
        Some(match &active.cycle {
            Some(cycle) => refresh.min(cycle.next_due()),
            None => refresh,
        })
    }

    /// When the frame activity is next due
    pub fn next_frame_due(&self) -> Option<Instant> {
        self.active.as_ref().map(|active| active.refresh.next_due())
    }

    /// Run the cycle activity if it is due
    pub fn poll_cycle(&mut self, now: Instant) -> Tick {
        let Some(active) = self.active.as_mut() else {
            return Tick::Inactive;
        };
        let due = match active.cycle.as_mut() {
            Some(timer) => timer.poll(now),
            None => false,
        };
        if !due {
            return Tick::NotDue;
        }

        match self.core.cycle() {
            Ok(()) => {
                self.stats.cycles += 1;
                Tick::Ran
            }
            Err(source) => self.core_failure(CoreCall::Cycle, source),
        }
    }

    /// Run the frame activity if it is due: step the core, then decode and
    /// render onto `surface`
    pub fn poll_frame(&mut self, now: Instant, surface: &mut dyn DisplaySurface) -> Tick {
        let Some(active) = self.active.as_mut() else {
            return Tick::Inactive;
        };
        if !active.refresh.poll(now) {
            return Tick::NotDue;
        }

        let stepped = match self.timing.stepping {
            Stepping::Split => self
                .core
                .frame_advance()
                .map(|()| self.stats.frame_advances += 1)
                .map_err(|source| (CoreCall::FrameAdvance, source)),
            Stepping::PerFrame => self
                .core
                .cycle()
                .map(|()| self.stats.cycles += 1)
                .map_err(|source| (CoreCall::Cycle, source)),
        };
        if let Err((call, source)) = stepped {
            return self.core_failure(call, source);
        }

        match self.render_frame(surface) {
            Ok(()) => Tick::Ran,
            Err(err) => {
                log::warn!("Skipping frame: {}", err);
                self.stats.skipped_frames += 1;
                Tick::Skipped
            }
        }
    }

    /// Decode the core's current frame buffer and draw it, without stepping
    pub fn render_frame(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), DecodeError> {
        let buffer = self.core.frame_buffer();
        if !self.bit_planes_noted && matches!(buffer, FrameBuffer::BitPlanes(_)) {
            log::debug!("Core reports bit-plane frame buffers; packed rows are canonical");
            self.bit_planes_noted = true;
        }

        let grid = decode(&buffer)?;
        self.renderer.render(&grid, surface);
        self.stats.frames += 1;
        Ok(())
    }

    fn core_failure(&mut self, call: CoreCall, source: CoreFailure) -> Tick {
        let err = CoreCallError::new(call, source);
        self.stats.core_failures += 1;

        let tick = match self.timing.on_core_error {
            CoreErrorPolicy::Continue => {
                log::warn!("{}; skipping tick", err);
                Tick::Skipped
            }
            CoreErrorPolicy::Halt => {
                log::error!("{}; halting scheduler {}", err, self.id);
                self.active = None;
                Tick::Halted
            }
        };
        self.last_core_error = Some(err);
        tick
    }
}
