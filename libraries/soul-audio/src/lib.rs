//! Soul Visualizer Audio
//!
//! Pure, allocation-light building blocks for the visualizer and equalizer.
//!
//! This crate provides:
//! - Waveform envelope reduction (raw 8-bit capture buffer -> fixed slot levels)
//! - Virtual-to-physical equalizer band mapping and dB/millibel conversion
//! - The fixed 10-band preset table
//!
//! Nothing here touches platform services; the stateful pieces built on top
//! of these live in `soul-audio-mobile`.
//!
//! # Example: Reducing a Capture Buffer
//!
//! ```rust
//! use soul_audio::visualization::{reduce_waveform, DEFAULT_SLOTS};
//!
//! let raw = vec![-128i8; 640];
//! let levels = reduce_waveform(&raw, DEFAULT_SLOTS);
//!
//! assert_eq!(levels.len(), 64);
//! assert!(levels.iter().all(|&level| level == 128));
//! ```
//!
//! # Example: Mapping Bands
//!
//! ```rust
//! use soul_audio::equalizer::{BandMapper, EqualizerPreset};
//!
//! // A typical device exposes 5 physical bands
//! let mapper = BandMapper::new(5);
//! assert_eq!(mapper.physical_index_for(0), Some(0));
//! assert_eq!(mapper.physical_index_for(9), Some(4));
//!
//! let rock = EqualizerPreset::Rock.gains().unwrap();
//! assert_eq!(rock, [5, 3, -3, -5, -2, 2, 5, 6, 6, 6]);
//! ```

#![forbid(unsafe_code)]

pub mod equalizer;
pub mod visualization;

pub use equalizer::{BandMapper, EqualizerPreset, UnknownPresetError};
pub use visualization::WaveformReducer;
