//! Waveform envelope reduction
//!
//! Partitions a captured buffer into equal contiguous groups and reports the
//! mean absolute amplitude of each group:
//!
//! ```text
//! raw:   |--g0--|--g1--| ... |--g63--|rest|
//! out:   [mean|g0|, mean|g1|, ..., mean|g63|]      rest is ignored
//! ```
//!
//! `group_size = raw.len() / slots` (integer division). When the buffer is
//! shorter than the slot count the group size is zero and every slot is 0.

use soul_core::VisualizationFrame;

/// Default number of slots in a visualization frame
pub const DEFAULT_SLOTS: usize = 64;

/// Largest level a slot can hold (`|i8::MIN|`)
pub const MAX_LEVEL: u8 = 128;

/// Reduce a raw waveform to `target_slots` mean absolute levels
///
/// Always returns exactly `target_slots` values in `[0, 128]`.
pub fn reduce_waveform(raw: &[i8], target_slots: usize) -> Vec<u8> {
    let mut levels = vec![0u8; target_slots];
    reduce_waveform_into(raw, &mut levels);
    levels
}

/// Reduce a raw waveform into a caller-provided slot buffer
///
/// The slot count is `out.len()`. Does not allocate, so it is safe to call
/// from the capture callback.
pub fn reduce_waveform_into(raw: &[i8], out: &mut [u8]) {
    let slots = out.len();
    if slots == 0 {
        return;
    }

    let group_size = raw.len() / slots;
    if group_size == 0 {
        out.fill(0);
        return;
    }

    // chunks_exact drops the trailing partial group
    for (level, group) in out.iter_mut().zip(raw.chunks_exact(group_size)) {
        let sum: usize = group.iter().map(|&s| usize::from(s.unsigned_abs())).sum();
        *level = (sum / group_size) as u8;
    }
}

/// Fixed-size waveform reducer
///
/// Holds the slot count so capture sessions can be configured once and
/// produce frames of a stable size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveformReducer {
    slots: usize,
}

impl WaveformReducer {
    /// Create a reducer producing `slots` levels per frame
    pub fn new(slots: usize) -> Self {
        Self { slots }
    }

    /// Slots per frame
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Reduce a capture buffer into an immutable frame
    pub fn reduce(&self, raw: &[i8]) -> VisualizationFrame {
        VisualizationFrame::from(reduce_waveform(raw, self.slots))
    }
}

impl Default for WaveformReducer {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}
