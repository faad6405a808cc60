//! Shared domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Platform audio session identifier
///
/// Every effect instance (equalizer, visualizer) is bound to exactly one
/// audio session. A new session id is issued whenever the transport prepares
/// new media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioSessionId(i32);

impl AudioSessionId {
    /// Wrap a raw platform session id
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw platform session id
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for AudioSessionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for AudioSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported gain range of a hardware equalizer band, in millibel
///
/// 100 mB = 1 dB. The bounds are always ordered (`min <= max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainRange {
    min_millibel: i16,
    max_millibel: i16,
}

impl GainRange {
    /// Create a range, swapping the bounds if they arrive reversed
    pub fn new(min_millibel: i16, max_millibel: i16) -> Self {
        if min_millibel <= max_millibel {
            Self {
                min_millibel,
                max_millibel,
            }
        } else {
            Self {
                min_millibel: max_millibel,
                max_millibel: min_millibel,
            }
        }
    }

    /// Lower bound in millibel
    pub fn min_millibel(&self) -> i16 {
        self.min_millibel
    }

    /// Upper bound in millibel
    pub fn max_millibel(&self) -> i16 {
        self.max_millibel
    }

    /// Check whether a millibel value lies inside the range
    pub fn contains(&self, millibel: i32) -> bool {
        (i32::from(self.min_millibel)..=i32::from(self.max_millibel)).contains(&millibel)
    }

    /// Clamp a millibel value into the range
    ///
    /// Takes `i32` so that out-of-range requests never wrap before clamping.
    pub fn clamp(&self, millibel: i32) -> i16 {
        millibel.clamp(i32::from(self.min_millibel), i32::from(self.max_millibel)) as i16
    }

    /// Range in whole decibels (truncated toward zero)
    pub fn to_db(&self) -> (i32, i32) {
        (
            i32::from(self.min_millibel) / 100,
            i32::from(self.max_millibel) / 100,
        )
    }
}

/// One reduced waveform frame
///
/// Each level is the mean absolute amplitude of one slot of the captured
/// buffer, in `[0, 128]`. Frames are immutable once published and cheap to
/// clone, so they can be fanned out to several consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizationFrame {
    levels: Arc<[u8]>,
}

impl VisualizationFrame {
    /// Create a frame from reduced levels
    pub fn new(levels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            levels: levels.into(),
        }
    }

    /// All-zero frame with the given slot count
    pub fn silent(slots: usize) -> Self {
        Self::new(vec![0u8; slots])
    }

    /// Reduced levels
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the frame has no slots
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Largest level in the frame (0 for an empty frame)
    pub fn peak(&self) -> u8 {
        self.levels.iter().copied().max().unwrap_or(0)
    }
}

impl From<Vec<u8>> for VisualizationFrame {
    fn from(levels: Vec<u8>) -> Self {
        Self::new(levels)
    }
}

impl AsRef<[u8]> for VisualizationFrame {
    fn as_ref(&self) -> &[u8] {
        &self.levels
    }
}
