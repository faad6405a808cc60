//! Virtual-band equalizer over a hardware equalizer
//!
//! The user always sees 10 bands. Each write is stored in the virtual gain
//! vector first and then, if the device has an equalizer, mapped onto a
//! physical band, converted to millibel, clamped and written.
//!
//! The virtual vector is authoritative: a failed hardware write is logged
//! but never rolls back the stored value, so the UI keeps reflecting what the
//! user asked for even when the device disagrees.
//!
//! ```text
//!                    ┌──────────────┐
//!   open() ──ok────► │ WithHardware │ ──┐
//!     │              └──────────────┘   │ release()
//!     │ failure      ┌──────────────┐   ├──────────► Released (terminal)
//!     └────────────► │ VirtualOnly  │ ──┘
//!                    └──────────────┘
//! ```

use soul_audio::equalizer::{
    db_to_millibel, BandMapper, EqualizerPreset, DEFAULT_GAIN_RANGE_DB, VIRTUAL_BAND_COUNT,
    VIRTUAL_BAND_FREQUENCIES,
};
use soul_core::{AudioSessionId, EqualizerProvider, GainRange, HardwareEqualizer, Result};
use tracing::{debug, info, warn};

/// Lifecycle of an equalizer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualizerLifecycle {
    /// Hardware acquired; writes reach the device
    WithHardware,
    /// No hardware; only the virtual vector is maintained
    VirtualOnly,
    /// Hardware released; the instance never re-activates
    Released,
}

/// Equalizer state for one audio session
pub struct EqualizerState {
    /// Acquired hardware handle (None when virtual-only or released)
    hardware: Option<Box<dyn HardwareEqualizer>>,

    /// Virtual-to-physical mapping for the acquired device
    mapper: BandMapper,

    /// Hardware gain range (only meaningful with hardware)
    gain_range: Option<GainRange>,

    /// Requested gains per virtual band (dB)
    gains: [i32; VIRTUAL_BAND_COUNT],

    /// Current preset
    preset: EqualizerPreset,

    lifecycle: EqualizerLifecycle,

    /// Failed hardware calls since acquisition
    hardware_failures: u64,
}

impl EqualizerState {
    /// Acquire the session's equalizer, falling back to virtual-only mode
    ///
    /// There is no retry: a device that refuses the effect simply gets a
    /// virtual equalizer for this session.
    pub fn open(provider: &dyn EqualizerProvider, session: AudioSessionId) -> Self {
        match provider.create_equalizer(session) {
            Ok(handle) => Self::with_hardware(handle),
            Err(e) => {
                warn!("Failed to initialize equalizer for session {}: {}", session, e);
                Self::virtual_only()
            }
        }
    }

    /// Take ownership of an acquired hardware equalizer
    ///
    /// Enables the effect and reads the device capability. If any of that
    /// fails the handle is released and the state is virtual-only.
    pub fn with_hardware(mut handle: Box<dyn HardwareEqualizer>) -> Self {
        match Self::probe(handle.as_mut()) {
            Ok((band_count, range)) => {
                info!(
                    "Equalizer initialized with {} actual bands ({} to {} mB)",
                    band_count,
                    range.min_millibel(),
                    range.max_millibel()
                );
                Self {
                    hardware: Some(handle),
                    mapper: BandMapper::new(band_count),
                    gain_range: Some(range),
                    gains: [0; VIRTUAL_BAND_COUNT],
                    preset: EqualizerPreset::Normal,
                    lifecycle: EqualizerLifecycle::WithHardware,
                    hardware_failures: 0,
                }
            }
            Err(e) => {
                warn!("Failed to initialize equalizer: {}", e);
                if let Err(e) = handle.release() {
                    warn!("Failed to release equalizer after init failure: {}", e);
                }
                Self::virtual_only()
            }
        }
    }

    /// Equalizer without hardware
    pub fn virtual_only() -> Self {
        Self {
            hardware: None,
            mapper: BandMapper::virtual_only(),
            gain_range: None,
            gains: [0; VIRTUAL_BAND_COUNT],
            preset: EqualizerPreset::Normal,
            lifecycle: EqualizerLifecycle::VirtualOnly,
            hardware_failures: 0,
        }
    }

    /// Capture device capability
    fn probe(handle: &mut dyn HardwareEqualizer) -> Result<(u16, GainRange)> {
        handle.set_enabled(true)?;
        let band_count = handle.band_count()?;
        let range = handle.gain_range()?;

        for band in 0..band_count {
            match handle.center_frequency(band) {
                Ok(millihertz) => debug!("Actual band {}: {}Hz", band, millihertz / 1000),
                Err(e) => debug!("Actual band {}: center frequency unavailable ({})", band, e),
            }
        }

        Ok((band_count, range))
    }

    /// Set the gain of a virtual band (dB)
    ///
    /// The value is stored even when there is no physical band to write to.
    /// Indices outside `0..10` are ignored.
    pub fn set_band_gain(&mut self, virtual_index: usize, gain_db: i32) {
        let Some(slot) = self.gains.get_mut(virtual_index) else {
            warn!("Ignoring gain for invalid virtual band {}", virtual_index);
            return;
        };
        *slot = gain_db;

        if self.preset != EqualizerPreset::Custom {
            debug!("Preset {} -> Custom", self.preset);
            self.preset = EqualizerPreset::Custom;
        }

        self.write_band(virtual_index, gain_db);
    }

    /// Push one virtual band to hardware, if mapped
    fn write_band(&mut self, virtual_index: usize, gain_db: i32) {
        let Some(physical) = self.mapper.physical_index_for(virtual_index) else {
            return;
        };
        let (Some(hardware), Some(range)) = (self.hardware.as_mut(), self.gain_range) else {
            return;
        };

        let millibel = db_to_millibel(gain_db, range);
        match hardware.set_band_level(physical, millibel) {
            Ok(()) => debug!(
                "Set virtual band {} (actual {}) to {}dB",
                virtual_index, physical, gain_db
            ),
            Err(e) => {
                self.hardware_failures += 1;
                warn!(
                    "Failed to set band gain (virtual {}, actual {}): {}",
                    virtual_index, physical, e
                );
            }
        }
    }

    /// Stored gain of a virtual band (0 for indices outside `0..10`)
    pub fn band_gain(&self, virtual_index: usize) -> i32 {
        self.gains.get(virtual_index).copied().unwrap_or(0)
    }

    /// Apply a preset to all 10 bands, in band order
    ///
    /// `Custom` keeps the current virtual gains and re-applies them.
    pub fn apply_preset(&mut self, preset: EqualizerPreset) {
        let gains = preset.gains().unwrap_or(self.gains);
        for (index, gain) in gains.into_iter().enumerate() {
            self.gains[index] = gain;
            self.write_band(index, gain);
        }
        self.preset = preset;
        info!("Applied preset: {}", preset.name());
    }

    /// All virtual gains (dB)
    pub fn all_band_gains(&self) -> [i32; VIRTUAL_BAND_COUNT] {
        self.gains
    }

    /// Set virtual gains from a slice
    ///
    /// Only the first 10 values are used; with fewer, the remaining bands
    /// keep their current gain.
    pub fn set_all_band_gains(&mut self, gains: &[i32]) {
        for (index, &gain) in gains.iter().take(VIRTUAL_BAND_COUNT).enumerate() {
            self.set_band_gain(index, gain);
        }
    }

    /// Engage or bypass hardware processing
    pub fn set_enabled(&mut self, enabled: bool) {
        let Some(hardware) = self.hardware.as_mut() else {
            debug!("No equalizer hardware; enabled={} not applied", enabled);
            return;
        };

        match hardware.set_enabled(enabled) {
            Ok(()) => debug!(
                "Equalizer {}",
                if enabled { "enabled" } else { "disabled" }
            ),
            Err(e) => {
                self.hardware_failures += 1;
                warn!("Failed to set equalizer enabled state: {}", e);
            }
        }
    }

    /// Whether hardware processing is engaged
    ///
    /// Read back from the device; `false` without hardware or when the
    /// device cannot report its state.
    pub fn is_enabled(&self) -> bool {
        match self.hardware.as_ref() {
            Some(hardware) => hardware.is_enabled().unwrap_or_else(|e| {
                warn!("Failed to read equalizer enabled state: {}", e);
                false
            }),
            None => false,
        }
    }

    /// Supported gain range in whole dB
    pub fn gain_range_db(&self) -> (i32, i32) {
        match (self.hardware.as_ref(), self.gain_range) {
            (Some(_), Some(range)) => range.to_db(),
            _ => DEFAULT_GAIN_RANGE_DB,
        }
    }

    /// Release the hardware equalizer
    ///
    /// Idempotent. Afterwards only virtual bookkeeping happens.
    pub fn release(&mut self) {
        if let Some(mut hardware) = self.hardware.take() {
            match hardware.release() {
                Ok(()) => info!("Equalizer released"),
                Err(e) => warn!("Failed to release equalizer: {}", e),
            }
        }
        self.lifecycle = EqualizerLifecycle::Released;
    }

    /// Current preset
    pub fn current_preset(&self) -> EqualizerPreset {
        self.preset
    }

    /// Lifecycle state
    pub fn lifecycle(&self) -> EqualizerLifecycle {
        self.lifecycle
    }

    /// Whether a hardware equalizer is held
    pub fn has_hardware(&self) -> bool {
        self.hardware.is_some()
    }

    /// Device-reported physical band count (0 without hardware)
    pub fn physical_band_count(&self) -> u16 {
        self.mapper.physical_band_count()
    }

    /// Band mapping in use
    pub fn mapper(&self) -> BandMapper {
        self.mapper
    }

    /// Failed hardware calls since acquisition
    pub fn hardware_failures(&self) -> u64 {
        self.hardware_failures
    }

    /// Center frequency of each virtual band (Hz)
    pub fn band_frequencies(&self) -> &'static [u32; VIRTUAL_BAND_COUNT] {
        &VIRTUAL_BAND_FREQUENCIES
    }
}

impl Default for EqualizerState {
    fn default() -> Self {
        Self::virtual_only()
    }
}

impl Drop for EqualizerState {
    fn drop(&mut self) {
        if self.hardware.is_some() {
            self.release();
        }
    }
}

impl std::fmt::Debug for EqualizerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualizerState")
            .field("lifecycle", &self.lifecycle)
            .field("physical_band_count", &self.mapper.physical_band_count())
            .field("gain_range", &self.gain_range)
            .field("gains", &self.gains)
            .field("preset", &self.preset)
            .field("hardware_failures", &self.hardware_failures)
            .finish_non_exhaustive()
    }
}
