//! Virtual-to-physical band mapping
//!
//! `physical = clamp(floor(virtual * N / 10), 0, N - 1)`
//!
//! For N = 5 the 10 virtual bands collapse pairwise:
//!
//! ```text
//! virtual:  0 1 | 2 3 | 4 5 | 6 7 | 8 9
//! physical:  0  |  1  |  2  |  3  |  4
//! ```
//!
//! The mapping is non-decreasing in the virtual index, so band order is
//! never inverted. With N = 0 there is nothing to map to.

use soul_core::GainRange;

/// Number of user-facing bands
pub const VIRTUAL_BAND_COUNT: usize = 10;

/// Center frequency of each virtual band (Hz)
pub const VIRTUAL_BAND_FREQUENCIES: [u32; VIRTUAL_BAND_COUNT] =
    [31, 62, 125, 250, 500, 1000, 2000, 4000, 8000, 16000];

/// Millibel per decibel
pub const MILLIBEL_PER_DB: i32 = 100;

/// Gain range reported when no hardware is present (dB)
pub const DEFAULT_GAIN_RANGE_DB: (i32, i32) = (-15, 15);

/// Map a virtual band to a physical band
///
/// Returns `None` when the device has no bands or the virtual index is
/// outside `0..10`.
pub fn physical_index_for(virtual_index: usize, physical_band_count: u16) -> Option<u16> {
    if physical_band_count == 0 || virtual_index >= VIRTUAL_BAND_COUNT {
        return None;
    }

    let count = usize::from(physical_band_count);
    let mapped = (virtual_index * count / VIRTUAL_BAND_COUNT).min(count - 1);
    Some(mapped as u16)
}

/// Convert whole decibels to millibel, clamped into the hardware range
pub fn db_to_millibel(gain_db: i32, range: GainRange) -> i16 {
    range.clamp(gain_db.saturating_mul(MILLIBEL_PER_DB))
}

/// Convert millibel to whole decibels (truncated toward zero)
pub fn millibel_to_db(millibel: i16) -> i32 {
    i32::from(millibel) / MILLIBEL_PER_DB
}

/// Band mapping for one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandMapper {
    physical_band_count: u16,
}

impl BandMapper {
    /// Create a mapper for a device reporting `physical_band_count` bands
    pub fn new(physical_band_count: u16) -> Self {
        Self {
            physical_band_count,
        }
    }

    /// Mapper for a device without an equalizer
    pub fn virtual_only() -> Self {
        Self::new(0)
    }

    /// Device-reported band count
    pub fn physical_band_count(&self) -> u16 {
        self.physical_band_count
    }

    /// Whether there is no physical band to write to
    pub fn is_virtual_only(&self) -> bool {
        self.physical_band_count == 0
    }

    /// Physical band for a virtual band (`None` = skip the hardware write)
    pub fn physical_index_for(&self, virtual_index: usize) -> Option<u16> {
        physical_index_for(virtual_index, self.physical_band_count)
    }

    /// Virtual bands that share the given physical band
    pub fn virtual_bands_for(&self, physical_index: u16) -> impl Iterator<Item = usize> + '_ {
        (0..VIRTUAL_BAND_COUNT).filter(move |&v| self.physical_index_for(v) == Some(physical_index))
    }
}
