//! Player controller
//!
//! Orchestrates one audio session at a time on behalf of the UI:
//!
//! ```text
//! load_music(uri) ── stop visualizer, release equalizer ──► transport.load
//!                                                               │
//! handle_prepared() ◄───────────── platform "prepared" ─────────┘
//!   ├─ VisualizationSession (capture starts on play)
//!   └─ EqualizerState: enabled flag, then custom gains or preset
//! ```
//!
//! Effect resources of two sessions never coexist: everything from the
//! previous track is released before new media is loaded.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use soul_audio::equalizer::{
    EqualizerPreset, DEFAULT_GAIN_RANGE_DB, VIRTUAL_BAND_COUNT, VIRTUAL_BAND_FREQUENCIES,
};
use soul_core::{
    EqualizerProvider, MediaPlayback, Result, SettingsStore, VisualizationFrame,
    VisualizerProvider,
};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::equalizer::EqualizerState;
use crate::handoff::{frame_channel, ChannelFrameSink, FrameSink};
use crate::preferences::EqualizerPreferences;
use crate::visualizer::VisualizationSession;

/// Copy persisted gains onto a flat curve (extra values ignored)
fn gains_array(gains: &[i32]) -> [i32; VIRTUAL_BAND_COUNT] {
    let mut out = [0; VIRTUAL_BAND_COUNT];
    for (slot, &gain) in out.iter_mut().zip(gains) {
        *slot = gain;
    }
    out
}

/// Log and drop a settings write failure
fn persist(what: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("Failed to save {}: {}", what, e);
    }
}

/// Session orchestration for the player UI
pub struct PlayerController {
    playback: Box<dyn MediaPlayback>,
    equalizers: Arc<dyn EqualizerProvider>,
    visualizers: Arc<dyn VisualizerProvider>,
    preferences: EqualizerPreferences,
    config: EngineConfig,

    frame_sink: Arc<ChannelFrameSink>,
    frames: Receiver<VisualizationFrame>,

    /// Session-scoped resources
    equalizer: Option<EqualizerState>,
    visualizer: Option<VisualizationSession>,

    // UI state
    media: Option<String>,
    prepared: bool,
    playing: bool,
    volume: f32,
    equalizer_enabled: bool,
    current_preset: EqualizerPreset,
    band_gains: [i32; VIRTUAL_BAND_COUNT],

    shut_down: bool,
}

impl PlayerController {
    /// Create a controller and load persisted equalizer settings
    pub fn new(
        playback: Box<dyn MediaPlayback>,
        equalizers: Arc<dyn EqualizerProvider>,
        visualizers: Arc<dyn VisualizerProvider>,
        store: Arc<dyn SettingsStore>,
        config: EngineConfig,
    ) -> Self {
        let preferences = EqualizerPreferences::with_defaults(store, &config.equalizer);
        let (sink, frames) = frame_channel(config.visualizer.frame_queue);

        let equalizer_enabled = preferences.enabled();
        let current_preset = preferences.preset();
        let band_gains = match current_preset.gains() {
            Some(gains) => gains,
            None => gains_array(&preferences.custom_gains()),
        };

        debug!(
            "Loaded equalizer settings: enabled={}, preset={}",
            equalizer_enabled, current_preset
        );

        Self {
            playback,
            equalizers,
            visualizers,
            preferences,
            config,
            frame_sink: Arc::new(sink),
            frames,
            equalizer: None,
            visualizer: None,
            media: None,
            prepared: false,
            playing: false,
            volume: 1.0,
            equalizer_enabled,
            current_preset,
            band_gains,
            shut_down: false,
        }
    }

    /// Load new media, releasing every effect of the previous session first
    pub fn load_music(&mut self, uri: &str) -> Result<()> {
        self.release_session();

        self.media = Some(uri.to_string());
        self.prepared = false;
        self.playing = false;

        info!("Loading media {}", uri);
        self.playback.load(uri)
    }

    /// Media is prepared: acquire effects for the new audio session
    pub fn handle_prepared(&mut self) {
        self.release_session();
        self.prepared = true;

        let session = self.playback.audio_session_id();
        info!("Media prepared (session {})", session);

        let sink: Arc<dyn FrameSink> = self.frame_sink.clone();
        self.visualizer = Some(VisualizationSession::new(
            Arc::clone(&self.visualizers),
            sink,
            self.config.visualizer.clone(),
        ));

        let mut equalizer = EqualizerState::open(self.equalizers.as_ref(), session);
        equalizer.set_enabled(self.equalizer_enabled);
        if self.current_preset.is_custom() {
            equalizer.set_all_band_gains(&self.band_gains);
        } else {
            equalizer.apply_preset(self.current_preset);
        }
        self.band_gains = equalizer.all_band_gains();
        self.equalizer = Some(equalizer);
    }

    /// Playback reached the end of the media
    pub fn handle_completion(&mut self) {
        self.playing = false;
        self.stop_capture();
    }

    /// Start playback and capture (ignored until prepared)
    pub fn play(&mut self) -> Result<()> {
        if !self.prepared {
            debug!("Play requested before media is prepared");
            return Ok(());
        }

        self.playback.play()?;
        self.playing = true;

        let session = self.playback.audio_session_id();
        if let Some(visualizer) = self.visualizer.as_mut() {
            if let Err(e) = visualizer.start(session) {
                warn!("Visualizer unavailable for session {}: {}", session, e);
            }
        }
        Ok(())
    }

    /// Pause playback and capture
    pub fn pause(&mut self) -> Result<()> {
        let result = self.playback.pause();
        self.playing = false;
        self.stop_capture();
        result
    }

    /// Stop playback and capture
    pub fn stop(&mut self) -> Result<()> {
        let result = self.playback.stop();
        self.playing = false;
        self.stop_capture();
        result
    }

    /// Seek within the current media
    pub fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.playback.seek_to(position_ms)
    }

    /// Set playback volume (clamped to 0.0..=1.0)
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.volume = volume.clamp(0.0, 1.0);
        self.playback.set_volume(self.volume)
    }

    /// Toggle the equalizer and persist the choice
    pub fn set_equalizer_enabled(&mut self, enabled: bool) {
        self.equalizer_enabled = enabled;
        if let Some(equalizer) = self.equalizer.as_mut() {
            equalizer.set_enabled(enabled);
        }
        persist("equalizer enabled flag", self.preferences.save_enabled(enabled));
    }

    /// Select a preset and persist it
    ///
    /// Selecting `Custom` keeps the current curve and persists it as the
    /// custom gains.
    pub fn set_equalizer_preset(&mut self, preset: EqualizerPreset) {
        self.current_preset = preset;
        match self.equalizer.as_mut() {
            Some(equalizer) => {
                equalizer.apply_preset(preset);
                self.band_gains = equalizer.all_band_gains();
            }
            None => {
                if let Some(gains) = preset.gains() {
                    self.band_gains = gains;
                }
            }
        }

        persist("equalizer preset", self.preferences.save_preset(preset));
        if preset.is_custom() {
            persist(
                "custom gains",
                self.preferences.save_custom_gains(&self.band_gains),
            );
        }
    }

    /// Adjust a single band; the preset becomes `Custom`
    pub fn set_band_gain(&mut self, band: usize, gain_db: i32) {
        if band >= VIRTUAL_BAND_COUNT {
            warn!("Ignoring gain for invalid band {}", band);
            return;
        }

        if let Some(equalizer) = self.equalizer.as_mut() {
            equalizer.set_band_gain(band, gain_db);
        }
        self.band_gains[band] = gain_db;

        if self.current_preset != EqualizerPreset::Custom {
            debug!("Preset {} -> Custom", self.current_preset);
            self.current_preset = EqualizerPreset::Custom;
            persist(
                "equalizer preset",
                self.preferences.save_preset(EqualizerPreset::Custom),
            );
        }

        persist(
            "custom gains",
            self.preferences.save_custom_gains(&self.band_gains),
        );
    }

    /// Gain range for the band sliders (dB)
    pub fn gain_range_db(&self) -> (i32, i32) {
        self.equalizer
            .as_ref()
            .map_or(DEFAULT_GAIN_RANGE_DB, EqualizerState::gain_range_db)
    }

    /// Center frequency of each band (Hz)
    pub fn band_frequencies(&self) -> &'static [u32; VIRTUAL_BAND_COUNT] {
        &VIRTUAL_BAND_FREQUENCIES
    }

    /// Gains shown on the band sliders (dB)
    pub fn band_gains(&self) -> [i32; VIRTUAL_BAND_COUNT] {
        self.band_gains
    }

    /// Selected preset
    pub fn current_preset(&self) -> EqualizerPreset {
        self.current_preset
    }

    /// Equalizer toggle as chosen by the user
    pub fn equalizer_enabled(&self) -> bool {
        self.equalizer_enabled
    }

    /// Frames delivered from the capture thread
    pub fn frames(&self) -> &Receiver<VisualizationFrame> {
        &self.frames
    }

    /// Drain pending frames, keeping only the newest
    pub fn latest_frame(&self) -> Option<VisualizationFrame> {
        self.frames.try_iter().last()
    }

    /// Frames dropped because the consumer fell behind
    pub fn dropped_frames(&self) -> u64 {
        self.frame_sink.dropped_frames()
    }

    /// Whether media is prepared
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current media URI
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Playback position (0 until prepared)
    pub fn position_ms(&self) -> u64 {
        if self.prepared {
            self.playback.position_ms()
        } else {
            0
        }
    }

    /// Media duration (0 until prepared)
    pub fn duration_ms(&self) -> u64 {
        if self.prepared {
            self.playback.duration_ms()
        } else {
            0
        }
    }

    /// Session equalizer, once prepared
    pub fn equalizer(&self) -> Option<&EqualizerState> {
        self.equalizer.as_ref()
    }

    /// Session visualizer, once prepared
    pub fn visualizer(&self) -> Option<&VisualizationSession> {
        self.visualizer.as_ref()
    }

    /// Settings gateway
    pub fn preferences(&self) -> &EqualizerPreferences {
        &self.preferences
    }

    /// Release every resource, including the transport
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.release_session();
        self.playback.release();
        self.prepared = false;
        self.playing = false;
        self.shut_down = true;
        info!("Player controller shut down");
    }

    fn stop_capture(&mut self) {
        if let Some(visualizer) = self.visualizer.as_mut() {
            visualizer.stop();
        }
    }

    fn release_session(&mut self) {
        if let Some(mut visualizer) = self.visualizer.take() {
            visualizer.stop();
        }
        if let Some(mut equalizer) = self.equalizer.take() {
            equalizer.release();
        }
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
