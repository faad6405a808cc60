//! Test doubles for the platform capability traits
//!
//! Every fake shares its state through an `Arc<Mutex<..>>` probe so tests
//! can inspect what the engine did after handing ownership of the handle
//! away.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use soul_core::{
    AudioSessionId, EqualizerProvider, GainRange, HardwareEqualizer, HardwareVisualizer,
    MediaPlayback, Result, SettingsStore, SoulError, VisualizerProvider, WaveformCallback,
};

/// Install a test subscriber (`RUST_LOG=debug cargo test` for output)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

// ---------------------------------------------------------------------------
// Equalizer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EqualizerProbeState {
    pub session: Option<AudioSessionId>,
    /// Every successful `set_band_level` call, in order
    pub writes: Vec<(u16, i16)>,
    /// Every `set_enabled` call, in order
    pub enable_calls: Vec<bool>,
    pub enabled: bool,
    pub release_count: u32,
    pub fail_writes: bool,
    pub fail_band_count: bool,
    /// `set_enabled` is rejected (the call is still recorded)
    pub fail_enable: bool,
    /// `is_enabled` cannot be read back
    pub fail_read_enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EqualizerProbe(Arc<Mutex<EqualizerProbeState>>);

impl EqualizerProbe {
    pub fn state(&self) -> MutexGuard<'_, EqualizerProbeState> {
        lock(&self.0)
    }

    pub fn writes(&self) -> Vec<(u16, i16)> {
        self.state().writes.clone()
    }

    pub fn release_count(&self) -> u32 {
        self.state().release_count
    }

    pub fn is_released(&self) -> bool {
        self.release_count() > 0
    }

    /// Last level written to each physical band
    pub fn levels(&self) -> HashMap<u16, i16> {
        self.writes().into_iter().collect()
    }
}

pub struct FakeEqualizer {
    band_count: u16,
    range: GainRange,
    probe: EqualizerProbe,
}

impl FakeEqualizer {
    pub fn new(band_count: u16, range: GainRange) -> (Self, EqualizerProbe) {
        let probe = EqualizerProbe::default();
        (
            Self {
                band_count,
                range,
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl HardwareEqualizer for FakeEqualizer {
    fn band_count(&self) -> Result<u16> {
        if self.probe.state().fail_band_count {
            return Err(SoulError::hardware("band count unavailable"));
        }
        Ok(self.band_count)
    }

    fn gain_range(&self) -> Result<GainRange> {
        Ok(self.range)
    }

    fn center_frequency(&self, band: u16) -> Result<u32> {
        Ok((u32::from(band) + 1) * 1_000_000)
    }

    fn set_band_level(&mut self, band: u16, millibel: i16) -> Result<()> {
        let mut state = self.probe.state();
        if state.release_count > 0 {
            return Err(SoulError::Released("equalizer"));
        }
        if state.fail_writes {
            return Err(SoulError::hardware("band write rejected"));
        }
        assert!(band < self.band_count, "band {band} out of range");
        state.writes.push((band, millibel));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        let mut state = self.probe.state();
        state.enable_calls.push(enabled);
        if state.fail_enable {
            return Err(SoulError::hardware("setEnabled rejected"));
        }
        state.enabled = enabled;
        Ok(())
    }

    fn is_enabled(&self) -> Result<bool> {
        let state = self.probe.state();
        if state.fail_read_enabled {
            return Err(SoulError::hardware("getEnabled unavailable"));
        }
        Ok(state.enabled)
    }

    fn release(&mut self) -> Result<()> {
        self.probe.state().release_count += 1;
        Ok(())
    }
}

/// Hands out `FakeEqualizer`s with a fixed capability
pub struct FakeEqualizerProvider {
    band_count: u16,
    range: GainRange,
    fail: AtomicBool,
    fail_band_count: AtomicBool,
    created: Mutex<Vec<EqualizerProbe>>,
    live_on_create: Mutex<Vec<usize>>,
}

impl FakeEqualizerProvider {
    pub fn new(band_count: u16, range: GainRange) -> Self {
        Self {
            band_count,
            range,
            fail: AtomicBool::new(false),
            fail_band_count: AtomicBool::new(false),
            created: Mutex::new(Vec::new()),
            live_on_create: Mutex::new(Vec::new()),
        }
    }

    /// Five bands, +/-15 dB (typical Android device)
    pub fn typical() -> Self {
        Self::new(5, GainRange::new(-1500, 1500))
    }

    /// Provider whose device refuses to create the effect
    pub fn unavailable() -> Self {
        let provider = Self::typical();
        provider.set_fail(true);
        provider
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_band_count(&self, fail: bool) {
        self.fail_band_count.store(fail, Ordering::SeqCst);
    }

    pub fn instances(&self) -> Vec<EqualizerProbe> {
        lock(&self.created).clone()
    }

    pub fn last(&self) -> Option<EqualizerProbe> {
        lock(&self.created).last().cloned()
    }

    /// Unreleased instances observed at each creation
    pub fn live_on_create(&self) -> Vec<usize> {
        lock(&self.live_on_create).clone()
    }
}

impl EqualizerProvider for FakeEqualizerProvider {
    fn create_equalizer(&self, session: AudioSessionId) -> Result<Box<dyn HardwareEqualizer>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SoulError::hardware_unavailable("equalizer effect denied"));
        }

        let (equalizer, probe) = FakeEqualizer::new(self.band_count, self.range);
        {
            let mut state = probe.state();
            state.session = Some(session);
            state.fail_band_count = self.fail_band_count.load(Ordering::SeqCst);
        }

        let mut created = lock(&self.created);
        let live = created.iter().filter(|p| !p.is_released()).count();
        lock(&self.live_on_create).push(live);
        created.push(probe);

        Ok(Box::new(equalizer))
    }
}

// ---------------------------------------------------------------------------
// Visualizer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct VisualizerProbeState {
    pub session: Option<AudioSessionId>,
    pub capture_size: Option<usize>,
    pub rate_millihertz: Option<u32>,
    pub enabled: bool,
    pub release_count: u32,
    pub callback: Option<WaveformCallback>,
}

#[derive(Clone, Default)]
pub struct VisualizerProbe(Arc<Mutex<VisualizerProbeState>>);

impl VisualizerProbe {
    pub fn state(&self) -> MutexGuard<'_, VisualizerProbeState> {
        lock(&self.0)
    }

    pub fn release_count(&self) -> u32 {
        self.state().release_count
    }

    pub fn is_released(&self) -> bool {
        self.release_count() > 0
    }

    pub fn is_enabled(&self) -> bool {
        self.state().enabled
    }

    pub fn capture_size(&self) -> Option<usize> {
        self.state().capture_size
    }

    pub fn rate_millihertz(&self) -> Option<u32> {
        self.state().rate_millihertz
    }

    /// Deliver one capture tick, like the platform capture thread would
    ///
    /// Returns false when capture is not running.
    pub fn fire(&self, raw: &[i8]) -> bool {
        let mut state = self.state();
        if !state.enabled || state.release_count > 0 {
            return false;
        }
        match state.callback.as_mut() {
            Some(callback) => {
                callback(raw);
                true
            }
            None => false,
        }
    }
}

pub struct FakeVisualizer {
    size_range: (usize, usize),
    max_rate: u32,
    fail_register: bool,
    probe: VisualizerProbe,
}

impl HardwareVisualizer for FakeVisualizer {
    fn capture_size_range(&self) -> (usize, usize) {
        self.size_range
    }

    fn max_capture_rate(&self) -> u32 {
        self.max_rate
    }

    fn set_capture_size(&mut self, size: usize) -> Result<()> {
        let mut state = self.probe.state();
        if state.enabled {
            return Err(SoulError::hardware("capture size set while enabled"));
        }
        state.capture_size = Some(size);
        Ok(())
    }

    fn register_waveform_callback(
        &mut self,
        rate_millihertz: u32,
        callback: WaveformCallback,
    ) -> Result<()> {
        if self.fail_register {
            return Err(SoulError::hardware("capture listener rejected"));
        }
        let mut state = self.probe.state();
        state.rate_millihertz = Some(rate_millihertz);
        state.callback = Some(callback);
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.probe.state().enabled = enabled;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        let mut state = self.probe.state();
        state.release_count += 1;
        state.enabled = false;
        state.callback = None;
        Ok(())
    }
}

/// Hands out `FakeVisualizer`s
pub struct FakeVisualizerProvider {
    size_range: (usize, usize),
    max_rate: u32,
    fail: AtomicBool,
    fail_register: AtomicBool,
    created: Mutex<Vec<VisualizerProbe>>,
    live_on_create: Mutex<Vec<usize>>,
}

impl FakeVisualizerProvider {
    pub fn new(size_range: (usize, usize), max_rate: u32) -> Self {
        Self {
            size_range,
            max_rate,
            fail: AtomicBool::new(false),
            fail_register: AtomicBool::new(false),
            created: Mutex::new(Vec::new()),
            live_on_create: Mutex::new(Vec::new()),
        }
    }

    /// 128..=1024 samples, 20 Hz max (typical Android device)
    pub fn typical() -> Self {
        Self::new((128, 1024), 20_000)
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_register(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    pub fn instances(&self) -> Vec<VisualizerProbe> {
        lock(&self.created).clone()
    }

    pub fn last(&self) -> Option<VisualizerProbe> {
        lock(&self.created).last().cloned()
    }

    pub fn created_count(&self) -> usize {
        lock(&self.created).len()
    }

    /// Unreleased instances observed at each creation
    pub fn live_on_create(&self) -> Vec<usize> {
        lock(&self.live_on_create).clone()
    }
}

impl VisualizerProvider for FakeVisualizerProvider {
    fn create_visualizer(&self, session: AudioSessionId) -> Result<Box<dyn HardwareVisualizer>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SoulError::hardware_unavailable("visualizer denied"));
        }

        let probe = VisualizerProbe::default();
        probe.state().session = Some(session);

        let mut created = lock(&self.created);
        let live = created.iter().filter(|p| !p.is_released()).count();
        lock(&self.live_on_create).push(live);
        created.push(probe.clone());

        Ok(Box::new(FakeVisualizer {
            size_range: self.size_range,
            max_rate: self.max_rate,
            fail_register: self.fail_register.load(Ordering::SeqCst),
            probe,
        }))
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PlaybackProbeState {
    pub session: i32,
    pub loaded: Vec<String>,
    /// Transport calls in order ("play", "pause", "stop", ...)
    pub calls: Vec<String>,
    pub volume: Option<f32>,
    pub position_ms: u64,
    pub released: u32,
    pub fail_play: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackProbe(Arc<Mutex<PlaybackProbeState>>);

impl PlaybackProbe {
    pub fn state(&self) -> MutexGuard<'_, PlaybackProbeState> {
        lock(&self.0)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Simulate the platform assigning a new audio session
    pub fn set_session(&self, session: i32) {
        self.state().session = session;
    }
}

pub struct FakePlayback {
    probe: PlaybackProbe,
}

impl FakePlayback {
    pub fn new(session: i32) -> (Self, PlaybackProbe) {
        let probe = PlaybackProbe::default();
        probe.set_session(session);
        (
            Self {
                probe: probe.clone(),
            },
            probe,
        )
    }

    fn record(&self, call: &str) {
        self.probe.state().calls.push(call.to_string());
    }
}

impl MediaPlayback for FakePlayback {
    fn load(&mut self, uri: &str) -> Result<()> {
        self.probe.state().loaded.push(uri.to_string());
        self.record("load");
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.probe.state().fail_play {
            return Err(SoulError::playback("transport refused to start"));
        }
        self.record("play");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record("pause");
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.record("stop");
        Ok(())
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.probe.state().position_ms = position_ms;
        self.record("seek");
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.probe.state().volume = Some(volume);
        Ok(())
    }

    fn audio_session_id(&self) -> AudioSessionId {
        AudioSessionId::new(self.probe.state().session)
    }

    fn duration_ms(&self) -> u64 {
        180_000
    }

    fn position_ms(&self) -> u64 {
        self.probe.state().position_ms
    }

    fn release(&mut self) {
        self.probe.state().released += 1;
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// In-memory store that counts writes per key
#[derive(Debug, Default)]
pub struct CountingSettingsStore {
    inner: soul_core::MemorySettingsStore,
    writes: Mutex<HashMap<String, usize>>,
}

impl CountingSettingsStore {
    pub fn writes(&self, key: &str) -> usize {
        lock(&self.writes).get(key).copied().unwrap_or(0)
    }

    fn count(&self, key: &str) {
        *lock(&self.writes).entry(key.to_string()).or_insert(0) += 1;
    }
}

impl SettingsStore for CountingSettingsStore {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.inner.get_bool(key, default)
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.count(key);
        self.inner.set_bool(key, value)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.inner.get_string(key)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.count(key);
        self.inner.set_string(key, value)
    }

    fn clear(&self) -> Result<()> {
        self.inner.clear()
    }
}

/// Store whose writes always fail (full disk, revoked permissions)
#[derive(Debug, Default)]
pub struct FailingSettingsStore;

impl SettingsStore for FailingSettingsStore {
    fn get_bool(&self, _key: &str, default: bool) -> bool {
        default
    }

    fn set_bool(&self, key: &str, _value: bool) -> Result<()> {
        Err(SoulError::settings(format!("cannot write {key}")))
    }

    fn get_string(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_string(&self, key: &str, _value: &str) -> Result<()> {
        Err(SoulError::settings(format!("cannot write {key}")))
    }

    fn clear(&self) -> Result<()> {
        Err(SoulError::settings("cannot clear"))
    }
}
