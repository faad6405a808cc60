//! Soul Visualizer - Mobile Audio Bridge
//!
//! Stateful equalizer and visualizer logic on top of the platform's audio
//! effect services (Android `audiofx`, iOS equivalents). The platform side
//! implements the capability traits from `soul-core`; everything here is
//! platform-agnostic and testable with fakes.
//!
//! This crate provides:
//! - `EqualizerState`: 10 virtual bands over N physical bands, presets,
//!   graceful virtual-only fallback when the device has no equalizer
//! - `VisualizationSession`: waveform capture lifecycle, reduction to 64-slot
//!   frames, lock-free handoff off the capture thread
//! - `EqualizerPreferences`: enabled flag, preset, custom gains persistence
//! - `PlayerController`: per-track session orchestration (acquire on prepare,
//!   release on track change)
//! - `EngineConfig`: file/env configuration
//!
//! # Architecture
//!
//! ```text
//! MediaPlayback ──prepared──► PlayerController
//!                               │        │
//!                               ▼        ▼
//!                     EqualizerState   VisualizationSession
//!                        │ BandMapper     │ waveform reduction
//!                        ▼                ▼
//!               HardwareEqualizer   HardwareVisualizer ──capture thread──► FrameSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use soul_audio_mobile::EqualizerState;
//! use soul_audio::EqualizerPreset;
//!
//! // No hardware: every read/write still works against the virtual bands
//! let mut eq = EqualizerState::virtual_only();
//! eq.apply_preset(EqualizerPreset::Rock);
//! assert_eq!(eq.all_band_gains(), [5, 3, -3, -5, -2, 2, 5, 6, 6, 6]);
//! assert_eq!(eq.gain_range_db(), (-15, 15));
//! assert!(!eq.is_enabled());
//! ```

#![forbid(unsafe_code)]

pub mod config;
mod controller;
mod equalizer;
mod handoff;
mod preferences;
mod visualizer;

pub use self::config::{EngineConfig, EqualizerConfig, VisualizerConfig};
pub use controller::PlayerController;
pub use equalizer::{EqualizerLifecycle, EqualizerState};
pub use handoff::{frame_channel, ChannelFrameSink, FrameSink};
pub use preferences::{
    format_custom_gains, parse_custom_gains, EqualizerPreferences, KEY_CUSTOM_GAINS, KEY_ENABLED,
    KEY_PRESET,
};
pub use visualizer::VisualizationSession;
