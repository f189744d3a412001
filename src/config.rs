// Configuration management
//
// Viewer settings persisted as TOML: loop cadence and the display palette.

use crate::display::{Color, DisplayRenderer, WindowConfig};
use crate::error::ConfigError;
use crate::scheduler::{CoreErrorPolicy, LoopTiming, Stepping};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file path
pub const CONFIG_FILE: &str = "chip8_display.toml";

/// Viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Loop cadence
    pub timing: TimingConfig,

    /// Window and palette
    pub video: VideoConfig,
}

/// Loop cadence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Target interval between cycles, in microseconds
    pub cycle_interval_us: u64,

    /// Shortest interval the host honours, in microseconds
    pub min_interval_us: u64,

    /// Display refresh rate in Hz
    pub refresh_hz: u32,

    /// Stepping mode
    pub stepping: Stepping,

    /// What a failing cycle or frame advance does
    pub on_core_error: CoreErrorPolicy,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Window title
    pub title: String,

    /// Enable VSync
    pub vsync: bool,

    /// Lit cell colour, `#RRGGBB`
    pub foreground: String,

    /// Background colour, `#RRGGBB`
    pub background: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            cycle_interval_us: 1_000,
            min_interval_us: 1_000,
            refresh_hz: 60,
            stepping: Stepping::Split,
            on_core_error: CoreErrorPolicy::Continue,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            title: "CHIP-8 Display".to_string(),
            vsync: true,
            foreground: "#FFFFFF".to_string(),
            background: "#000000".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from `chip8_display.toml` or create default
    ///
    /// If the file cannot be read, the default configuration is returned and
    /// written back to the file (best effort).
    pub fn load_or_default() -> Self {
        Self::load_or_default_at(CONFIG_FILE)
    }

    /// `load_or_default()` for an explicit path
    pub fn load_or_default_at<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                log::debug!("Using default configuration ({})", err);
                let config = Self::default();
                if let Err(err) = config.save_to(path) {
                    log::debug!("Could not write default configuration: {}", err);
                }
                config
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a file
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Scheduler cadence described by this configuration
    pub fn loop_timing(&self) -> LoopTiming {
        LoopTiming::new()
            .with_cycle_interval(Duration::from_micros(self.timing.cycle_interval_us))
            .with_min_interval(Duration::from_micros(self.timing.min_interval_us))
            .with_refresh_hz(self.timing.refresh_hz)
            .with_stepping(self.timing.stepping)
            .with_core_error_policy(self.timing.on_core_error)
    }

    /// Renderer with the configured palette
    pub fn renderer(&self) -> Result<DisplayRenderer, ConfigError> {
        Ok(DisplayRenderer::with_colors(
            Color::from_hex(&self.video.background)?,
            Color::from_hex(&self.video.foreground)?,
        ))
    }

    /// Window settings
    pub fn window(&self) -> WindowConfig {
        WindowConfig::new()
            .with_title(self.video.title.clone())
            .with_vsync(self.video.vsync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.timing.cycle_interval_us, 1_000);
        assert_eq!(config.timing.refresh_hz, 60);
        assert_eq!(config.timing.stepping, Stepping::Split);
        assert!(config.video.vsync);
    }

    #[test]
    fn test_config_serialization() {
        let config = ViewerConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: ViewerConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            [timing]
            stepping = "per_frame"
            on_core_error = "halt"
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.stepping, Stepping::PerFrame);
        assert_eq!(config.timing.on_core_error, CoreErrorPolicy::Halt);
        assert_eq!(config.timing.refresh_hz, 60);
        assert_eq!(config.video, VideoConfig::default());
    }

    #[test]
    fn test_loop_timing_conversion() {
        let mut config = ViewerConfig::default();
        config.timing.cycle_interval_us = 500;
        config.timing.min_interval_us = 4_000;

        let timing = config.loop_timing();
        assert_eq!(timing.cycle_interval, Duration::from_micros(500));
        assert_eq!(timing.effective_cycle_interval(), Duration::from_millis(4));
    }

    #[test]
    fn test_renderer_colors() {
        let mut config = ViewerConfig::default();
        config.video.foreground = "#33FF66".to_string();

        let renderer = config.renderer().unwrap();
        assert_eq!(renderer.foreground(), Color::rgb(0x33FF66));
        assert_eq!(renderer.background(), Color::rgb(0x000000));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let mut config = ViewerConfig::default();
        config.video.background = "black".to_string();
        assert!(matches!(config.renderer(), Err(ConfigError::Color(_))));
    }

    #[test]
    fn test_missing_file_writes_defaults_back() {
        let dir = std::env::temp_dir().join(format!(
            "chip8_display_defaults_test_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        let _ = fs::remove_file(&path);

        let config = ViewerConfig::load_or_default_at(&path);
        assert_eq!(config, ViewerConfig::default());
        assert!(path.exists());

        // The written file is read back as-is on the next start
        let reloaded = ViewerConfig::load_from(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(reloaded, ViewerConfig::default());
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let path = std::env::temp_dir().join(format!(
            "chip8_display_existing_test_{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[video]\ntitle = \"kept\"\n").unwrap();

        let config = ViewerConfig::load_or_default_at(&path);
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.video.title, "kept");
        assert_eq!(contents, "[video]\ntitle = \"kept\"\n");
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "chip8_display_config_test_{}.toml",
            std::process::id()
        ));
        let mut config = ViewerConfig::default();
        config.video.title = "saved".to_string();

        config.save_to(&path).unwrap();
        let loaded = ViewerConfig::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.video.title, "saved");
    }
}
