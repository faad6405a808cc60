//! Visualization feature extraction
//!
//! Only the amplitude envelope of a time-domain buffer is extracted. There is
//! no frequency-domain analysis here.

mod waveform;

pub use waveform::{
    reduce_waveform, reduce_waveform_into, WaveformReducer, DEFAULT_SLOTS, MAX_LEVEL,
};
