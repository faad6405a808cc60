//! Virtual 10-band equalizer model
//!
//! The user-facing control surface always has 10 bands at fixed octave
//! frequencies. Devices expose their own (usually smaller) number of
//! physical bands; `BandMapper` reconciles the two.

mod band_mapper;
mod preset;

pub use band_mapper::{
    db_to_millibel, millibel_to_db, physical_index_for, BandMapper, DEFAULT_GAIN_RANGE_DB,
    MILLIBEL_PER_DB, VIRTUAL_BAND_COUNT, VIRTUAL_BAND_FREQUENCIES,
};
pub use preset::{EqualizerPreset, UnknownPresetError};
