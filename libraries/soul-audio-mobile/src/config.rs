//! Engine configuration
//!
//! Loaded from an optional TOML file, overridden by `SOUL_`-prefixed
//! environment variables (`SOUL_VISUALIZER__SLOTS=32`).
use std::path::Path;

use serde::{Deserialize, Serialize};
use soul_audio::equalizer::EqualizerPreset;
use soul_audio::visualization::DEFAULT_SLOTS;
use soul_core::{Result, SoulError};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub visualizer: VisualizerConfig,

    #[serde(default)]
    pub equalizer: EqualizerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VisualizerConfig {
    /// Slots per visualization frame
    #[serde(default = "default_slots")]
    pub slots: usize,

    /// Capture buffer size in samples (device maximum when unset)
    #[serde(default)]
    pub capture_size: Option<usize>,

    /// Capture rate in milliHertz (device maximum when unset)
    #[serde(default)]
    pub capture_rate_millihertz: Option<u32>,

    /// Frames buffered between the capture thread and the consumer
    #[serde(default = "default_frame_queue")]
    pub frame_queue: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EqualizerConfig {
    /// Enabled flag used when nothing has been persisted yet
    #[serde(default = "default_enabled")]
    pub default_enabled: bool,

    /// Preset used when nothing has been persisted yet
    #[serde(default)]
    pub default_preset: EqualizerPreset,
}

impl EngineConfig {
    /// Load configuration from file and environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            }
        }

        // Override with environment variables (prefixed with SOUL_)
        settings = settings.add_source(
            config::Environment::with_prefix("SOUL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| SoulError::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SoulError::config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.visualizer.slots == 0 {
            return Err(SoulError::config("visualizer.slots must be at least 1"));
        }

        if self.visualizer.frame_queue == 0 {
            return Err(SoulError::config("visualizer.frame_queue must be at least 1"));
        }

        if self.visualizer.capture_size == Some(0) {
            return Err(SoulError::config("visualizer.capture_size must be at least 1"));
        }

        if self.visualizer.capture_rate_millihertz == Some(0) {
            return Err(SoulError::config(
                "visualizer.capture_rate_millihertz must be at least 1",
            ));
        }

        Ok(())
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            capture_size: None,
            capture_rate_millihertz: None,
            frame_queue: default_frame_queue(),
        }
    }
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            default_enabled: default_enabled(),
            default_preset: EqualizerPreset::default(),
        }
    }
}

// Default values
fn default_slots() -> usize {
    DEFAULT_SLOTS
}

fn default_frame_queue() -> usize {
    4
}

fn default_enabled() -> bool {
    true
}
