//! Soul Visualizer Core
//!
//! Platform-agnostic types, capability traits, and error handling shared by the
//! visualizer and equalizer crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `AudioSessionId`, `GainRange`, `VisualizationFrame`
//! - **Capability Traits**: `HardwareEqualizer`, `HardwareVisualizer`, `SettingsStore`,
//!   `MediaPlayback` (implemented by the platform bridge)
//! - **Settings Stores**: in-memory and JSON-file backed `SettingsStore` implementations
//! - **Error Handling**: Unified `SoulError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soul_core::{GainRange, MemorySettingsStore, SettingsStore};
//!
//! let range = GainRange::new(-1500, 1500);
//! assert_eq!(range.clamp(2000), 1500);
//! assert_eq!(range.to_db(), (-15, 15));
//!
//! let store = MemorySettingsStore::new();
//! store.set_bool("equalizer_enabled", false).unwrap();
//! assert!(!store.get_bool("equalizer_enabled", true));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoulError};
pub use settings::{JsonFileSettingsStore, MemorySettingsStore};
pub use traits::{
    EqualizerProvider, HardwareEqualizer, HardwareVisualizer, MediaPlayback, SettingsStore,
    VisualizerProvider, WaveformCallback,
};
pub use types::{AudioSessionId, GainRange, VisualizationFrame};
