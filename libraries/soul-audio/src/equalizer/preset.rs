//! Equalizer presets
//!
//! Fixed 10-band gain curves in whole dB. `Custom` has no curve of its own:
//! it stands for whatever the virtual gain vector currently holds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::band_mapper::VIRTUAL_BAND_COUNT;

/// Error returned when parsing an unknown preset identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown equalizer preset: {0}")]
pub struct UnknownPresetError(pub String);

/// Equalizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EqualizerPreset {
    /// Normal - All bands at 0 dB
    #[default]
    Normal,

    /// Pop - Lifted mids, softened extremes
    Pop,

    /// Rock - Scooped low-mids, bright top end
    Rock,

    /// Jazz - Warm lows, gentle presence
    Jazz,

    /// Classical - Full lows, relaxed mids
    Classical,

    /// Dance - Heavy sub-bass, recessed upper mids
    Dance,

    /// Custom - User-defined settings
    Custom,
}

impl EqualizerPreset {
    /// Every preset in display order
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Pop,
        Self::Rock,
        Self::Jazz,
        Self::Classical,
        Self::Dance,
        Self::Custom,
    ];

    /// Get gain values for this preset (dB, one per virtual band)
    ///
    /// Returns `None` for `Custom`.
    pub fn gains(&self) -> Option<[i32; VIRTUAL_BAND_COUNT]> {
        match self {
            Self::Normal => Some([0; VIRTUAL_BAND_COUNT]),
            Self::Pop => Some([-2, -1, 0, 2, 4, 4, 2, 0, -1, -2]),
            Self::Rock => Some([5, 3, -3, -5, -2, 2, 5, 6, 6, 6]),
            Self::Jazz => Some([4, 3, 1, 2, -2, -2, 0, 2, 3, 4]),
            Self::Classical => Some([5, 4, 3, 2, -2, -2, 0, 2, 3, 4]),
            Self::Dance => Some([6, 4, 2, 0, 0, -3, -4, -4, 0, 0]),
            Self::Custom => None,
        }
    }

    /// Get preset display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Pop => "Pop",
            Self::Rock => "Rock",
            Self::Jazz => "Jazz",
            Self::Classical => "Classical",
            Self::Dance => "Dance",
            Self::Custom => "Custom",
        }
    }

    /// Stable identifier used for persistence
    pub fn id(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Pop => "POP",
            Self::Rock => "ROCK",
            Self::Jazz => "JAZZ",
            Self::Classical => "CLASSICAL",
            Self::Dance => "DANCE",
            Self::Custom => "CUSTOM",
        }
    }

    /// Whether this preset carries its own gain curve
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl fmt::Display for EqualizerPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EqualizerPreset {
    type Err = UnknownPresetError;

    /// Accepts the persisted identifier or the display name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(trimmed) || p.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_curve() {
        assert_eq!(
            EqualizerPreset::Rock.gains(),
            Some([5, 3, -3, -5, -2, 2, 5, 6, 6, 6])
        );
    }

    #[test]
    fn test_custom_has_no_curve() {
        assert!(EqualizerPreset::Custom.gains().is_none());
        assert!(EqualizerPreset::Custom.is_custom());
        for preset in EqualizerPreset::ALL.iter().filter(|p| !p.is_custom()) {
            assert!(preset.gains().is_some(), "{} has no curve", preset);
        }
    }

    #[test]
    fn test_curves_stay_within_default_range() {
        for preset in EqualizerPreset::ALL {
            if let Some(gains) = preset.gains() {
                assert!(gains.iter().all(|g| (-15..=15).contains(g)));
            }
        }
    }

    #[test]
    fn test_parse_identifier_and_name() {
        assert_eq!("ROCK".parse::<EqualizerPreset>(), Ok(EqualizerPreset::Rock));
        assert_eq!("classical".parse::<EqualizerPreset>(), Ok(EqualizerPreset::Classical));
        assert_eq!(" Dance ".parse::<EqualizerPreset>(), Ok(EqualizerPreset::Dance));
        assert_eq!(
            "Metal".parse::<EqualizerPreset>(),
            Err(UnknownPresetError("Metal".to_string()))
        );
    }

    #[test]
    fn test_id_round_trips() {
        for preset in EqualizerPreset::ALL {
            assert_eq!(preset.id().parse::<EqualizerPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(EqualizerPreset::default(), EqualizerPreset::Normal);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&EqualizerPreset::Classical).unwrap();
        assert_eq!(json, "\"CLASSICAL\"");
        let parsed: EqualizerPreset = serde_json::from_str("\"POP\"").unwrap();
        assert_eq!(parsed, EqualizerPreset::Pop);
    }
}
