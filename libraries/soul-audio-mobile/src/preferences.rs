//! Equalizer preferences
//!
//! Persists the enabled flag, the selected preset and the custom gain curve
//! in a generic key-value `SettingsStore`. Reads never fail: missing or
//! malformed values fall back to defaults.

use std::sync::Arc;

use soul_audio::equalizer::{EqualizerPreset, VIRTUAL_BAND_COUNT};
use soul_core::{Result, SettingsStore};
use tracing::{debug, warn};

use crate::config::EqualizerConfig;

/// Equalizer enabled flag (bool)
pub const KEY_ENABLED: &str = "equalizer_enabled";

/// Selected preset identifier (string, e.g. "ROCK")
pub const KEY_PRESET: &str = "equalizer_preset";

/// Custom gains, comma-joined (string, e.g. "0,2,-3,...")
pub const KEY_CUSTOM_GAINS: &str = "equalizer_custom_gains";

/// Parse a comma-joined gain list
///
/// Returns `None` if any entry is not an integer. Whitespace around entries
/// is tolerated.
pub fn parse_custom_gains(value: &str) -> Option<Vec<i32>> {
    value
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()
}

/// Join gains with commas
pub fn format_custom_gains(gains: &[i32]) -> String {
    gains
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Settings gateway for the equalizer
#[derive(Clone)]
pub struct EqualizerPreferences {
    store: Arc<dyn SettingsStore>,
    default_enabled: bool,
    default_preset: EqualizerPreset,
}

impl EqualizerPreferences {
    /// Preferences with built-in defaults (enabled, Normal)
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_defaults(store, &EqualizerConfig::default())
    }

    /// Preferences with configured defaults
    pub fn with_defaults(store: Arc<dyn SettingsStore>, config: &EqualizerConfig) -> Self {
        Self {
            store,
            default_enabled: config.default_enabled,
            default_preset: config.default_preset,
        }
    }

    /// Save the enabled flag
    pub fn save_enabled(&self, enabled: bool) -> Result<()> {
        self.store.set_bool(KEY_ENABLED, enabled)
    }

    /// Persisted enabled flag
    pub fn enabled(&self) -> bool {
        self.store.get_bool(KEY_ENABLED, self.default_enabled)
    }

    /// Save the selected preset
    pub fn save_preset(&self, preset: EqualizerPreset) -> Result<()> {
        self.store.set_string(KEY_PRESET, preset.id())
    }

    /// Persisted preset (default preset when missing or unknown)
    pub fn preset(&self) -> EqualizerPreset {
        let Some(id) = self.store.get_string(KEY_PRESET) else {
            return self.default_preset;
        };

        id.parse().unwrap_or_else(|e| {
            warn!("{}; falling back to {}", e, self.default_preset);
            self.default_preset
        })
    }

    /// Save the custom gain curve
    pub fn save_custom_gains(&self, gains: &[i32]) -> Result<()> {
        self.store
            .set_string(KEY_CUSTOM_GAINS, &format_custom_gains(gains))
    }

    /// Persisted custom gain curve
    ///
    /// Missing or malformed values yield 10 zeros. A well-formed list of a
    /// different length is returned as stored.
    pub fn custom_gains(&self) -> Vec<i32> {
        let Some(value) = self.store.get_string(KEY_CUSTOM_GAINS) else {
            return vec![0; VIRTUAL_BAND_COUNT];
        };

        parse_custom_gains(&value).unwrap_or_else(|| {
            warn!("Malformed custom gains {:?}; using flat curve", value);
            vec![0; VIRTUAL_BAND_COUNT]
        })
    }

    /// Clear all persisted settings
    pub fn clear(&self) -> Result<()> {
        debug!("Clearing equalizer preferences");
        self.store.clear()
    }
}

impl std::fmt::Debug for EqualizerPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualizerPreferences")
            .field("default_enabled", &self.default_enabled)
            .field("default_preset", &self.default_preset)
            .finish_non_exhaustive()
    }
}
