// Window module - Hosts the scheduler in a winit event loop
//
// The redraw event is the refresh-aligned trigger, `about_to_wait` polls the
// fixed-interval cycle trigger and then sleeps until the scheduler's next
// deadline. Keyboard input goes straight through the input bridge.

use super::surface::{RgbaSurface, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::error::ViewerError;
use crate::input::key_code;
use crate::machine::Chip8Core;
use crate::scheduler::{LoopHandle, LoopScheduler, Tick};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Whether presentation waits for vertical sync
    pub vsync: bool,
}

impl WindowConfig {
    /// Create a new window configuration with default values
    pub fn new() -> Self {
        Self {
            title: "CHIP-8 Display".to_string(),
            vsync: true,
        }
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Window that presents a scheduler's frames
pub struct ViewerWindow<C: Chip8Core> {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    scheduler: LoopScheduler<C>,
    handle: Option<LoopHandle>,
    error: Option<ViewerError>,
}

impl<C: Chip8Core> ViewerWindow<C> {
    /// Create a viewer (the window is created when the event loop resumes)
    pub fn new(config: WindowConfig, scheduler: LoopScheduler<C>) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            scheduler,
            handle: None,
            error: None,
        }
    }

    /// Get a reference to the scheduler
    pub fn scheduler(&self) -> &LoopScheduler<C> {
        &self.scheduler
    }

    /// Get a mutable reference to the scheduler
    pub fn scheduler_mut(&mut self) -> &mut LoopScheduler<C> {
        &mut self.scheduler
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(SURFACE_WIDTH, SURFACE_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = PixelsBuilder::new(SURFACE_WIDTH, SURFACE_HEIGHT, surface_texture)
            .enable_vsync(self.config.vsync)
            .build()?;

        log::info!(
            "Window created: {}x{} surface, vsync {}",
            SURFACE_WIDTH,
            SURFACE_HEIGHT,
            self.config.vsync
        );

        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    /// Poll the frame trigger, then present
    ///
    /// A redraw that is not due (e.g. the OS exposed the window) presents the
    /// last frame again; the pixel buffer still holds it.
    fn redraw(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        let tick = {
            let mut surface = RgbaSurface::new(pixels.frame_mut(), SURFACE_WIDTH, SURFACE_HEIGHT);
            self.scheduler.poll_frame(Instant::now(), &mut surface)
        };
        if tick != Tick::Ran {
            log::trace!("Re-presenting last frame ({:?})", tick);
        }

        if let Err(err) = pixels.render() {
            log::warn!("Render error: {}", err);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = self.scheduler.stop(&handle) {
                log::error!("Failed to stop scheduler: {}", err);
            }
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{}", err);
        self.error = Some(err);
        self.shutdown(event_loop);
    }
}

impl<C: Chip8Core> ApplicationHandler for ViewerWindow<C> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }

        match self.scheduler.start() {
            Ok(handle) => self.handle = Some(handle),
            Err(err) => self.fail(event_loop, err.into()),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                self.shutdown(event_loop);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                let Some(code) = key_code(physical_key) else {
                    return;
                };
                // Failures are logged by the bridge; input never stops the loop
                let _ = match state {
                    ElementState::Pressed => self.scheduler.input().on_key_down(code),
                    ElementState::Released => self.scheduler.input().on_key_up(code),
                };
            }
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        log::warn!("Surface resize failed: {}", err);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.scheduler.poll_cycle(now);

        if redraw_due(self.scheduler.next_frame_due(), now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        match self.scheduler.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Whether the frame activity is due at `now`
///
/// Requesting a redraw wakes the event loop immediately, so it is only done
/// once the refresh deadline has passed; otherwise the loop sleeps.
fn redraw_due(next_frame_due: Option<Instant>, now: Instant) -> bool {
    next_frame_due.is_some_and(|due| now >= due)
}

/// Run the viewer until the window is closed
///
/// # Arguments
/// * `config` - Window configuration
/// * `scheduler` - Idle scheduler owning the core to display
///
/// # Returns
/// The scheduler (stopped) so the caller can inspect the core afterwards
pub fn run_viewer<C: Chip8Core>(
    config: WindowConfig,
    scheduler: LoopScheduler<C>,
) -> Result<LoopScheduler<C>, ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut viewer = ViewerWindow::new(config, scheduler);
    event_loop.run_app(&mut viewer)?;

    match viewer.error.take() {
        Some(err) => Err(err),
        None => Ok(viewer.scheduler),
    }
}
