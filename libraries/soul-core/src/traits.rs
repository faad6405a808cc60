//! Capability traits implemented by the platform bridge
//!
//! The engine never talks to platform audio-effect services directly. Each
//! service is expressed as a trait here; handles are owned by exactly one
//! engine object and released explicitly.
use crate::error::Result;
use crate::types::{AudioSessionId, GainRange};

/// Waveform capture callback
///
/// Invoked once per capture tick on the platform capture thread with the raw
/// signed 8-bit waveform buffer.
///
/// **CRITICAL**: Runs on the capture thread. No locks, no blocking I/O.
pub type WaveformCallback = Box<dyn FnMut(&[i8]) + Send + 'static>;

/// Hardware equalizer bound to one audio session
pub trait HardwareEqualizer: Send {
    /// Number of physical bands supported by the device
    fn band_count(&self) -> Result<u16>;

    /// Supported per-band gain range in millibel
    fn gain_range(&self) -> Result<GainRange>;

    /// Center frequency of a physical band in milliHertz
    fn center_frequency(&self, band: u16) -> Result<u32>;

    /// Set the level of a physical band in millibel
    fn set_band_level(&mut self, band: u16, millibel: i16) -> Result<()>;

    /// Engage or bypass hardware processing
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Whether hardware processing is currently engaged
    fn is_enabled(&self) -> Result<bool>;

    /// Release the underlying platform resource
    fn release(&mut self) -> Result<()>;
}

/// Factory for hardware equalizers
pub trait EqualizerProvider: Send + Sync {
    /// Acquire an equalizer bound to the given session
    ///
    /// # Errors
    /// Returns an error if the device denies creating the effect instance
    fn create_equalizer(&self, session: AudioSessionId) -> Result<Box<dyn HardwareEqualizer>>;
}

/// Hardware waveform capture bound to one audio session
pub trait HardwareVisualizer: Send {
    /// Supported capture sizes `(min, max)` in samples
    fn capture_size_range(&self) -> (usize, usize);

    /// Highest supported capture rate in milliHertz
    fn max_capture_rate(&self) -> u32;

    /// Set the capture buffer size in samples
    fn set_capture_size(&mut self, size: usize) -> Result<()>;

    /// Register the waveform callback (spectral capture is never requested)
    fn register_waveform_callback(
        &mut self,
        rate_millihertz: u32,
        callback: WaveformCallback,
    ) -> Result<()>;

    /// Start or pause capture
    fn set_enabled(&mut self, enabled: bool) -> Result<()>;

    /// Release the underlying platform resource
    fn release(&mut self) -> Result<()>;
}

/// Factory for hardware visualizers
pub trait VisualizerProvider: Send + Sync {
    /// Acquire a capture resource bound to the given session
    ///
    /// # Errors
    /// Returns an error if the device denies creating the capture instance
    fn create_visualizer(&self, session: AudioSessionId) -> Result<Box<dyn HardwareVisualizer>>;
}

/// Key-value settings persistence
///
/// Implementations use interior mutability so a store can be shared between
/// the preferences gateway and other consumers.
pub trait SettingsStore: Send + Sync {
    /// Read a boolean, falling back to `default` when missing or mistyped
    fn get_bool(&self, key: &str, default: bool) -> bool;

    /// Write a boolean
    fn set_bool(&self, key: &str, value: bool) -> Result<()>;

    /// Read a string, `None` when missing or mistyped
    fn get_string(&self, key: &str) -> Option<String>;

    /// Write a string
    fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every stored value
    fn clear(&self) -> Result<()>;
}

/// Opaque media transport
///
/// Play/pause/seek/volume are delegated to the platform media service; the
/// engine only needs the audio session id once media is prepared.
pub trait MediaPlayback: Send {
    /// Load new media (asynchronous prepare on the platform side)
    fn load(&mut self, uri: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Stop playback and rewind
    fn stop(&mut self) -> Result<()>;

    /// Seek to a position in milliseconds
    fn seek_to(&mut self, position_ms: u64) -> Result<()>;

    /// Set volume (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Audio session of the prepared media
    fn audio_session_id(&self) -> AudioSessionId;

    /// Duration of the prepared media in milliseconds (0 if unknown)
    fn duration_ms(&self) -> u64;

    /// Current position in milliseconds (0 if unknown)
    fn position_ms(&self) -> u64;

    /// Release the transport
    fn release(&mut self);
}
