// CHIP-8 Display - Main Entry Point
//
// Runs the viewer over the built-in pattern core. Hold any key to invert the
// pattern; close the window to exit.

use chip8_display::display::run_viewer;
use chip8_display::{LoopScheduler, PatternCore, ViewerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("CHIP-8 Display (chip8-display) v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load_or_default();
    let scheduler = LoopScheduler::new(PatternCore::new(), config.loop_timing(), config.renderer()?);

    let scheduler = run_viewer(config.window(), scheduler)?;

    log::info!(
        "Display window closed after {} frames, {} cycles",
        scheduler.stats().frames,
        scheduler.core().cycles()
    );
    Ok(())
}
