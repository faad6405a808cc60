//! Frame handoff off the capture thread
//!
//! The capture callback must never block. Frames are handed to the consumer
//! with enqueue-and-forget semantics:
//!
//! ```text
//! Capture Thread                    Presentation Thread
//!      │                                    │
//!      │  publish(frame) -> try_send        │
//!      │───────────────────────────────────>│ recv / try_iter
//!      │  (queue full: frame dropped)       │
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use soul_core::VisualizationFrame;

/// Consumer of reduced frames
///
/// Called on the capture thread. Implementations must not block.
pub trait FrameSink: Send + Sync + 'static {
    /// Hand off one frame
    fn publish(&self, frame: VisualizationFrame);
}

impl<F> FrameSink for F
where
    F: Fn(VisualizationFrame) + Send + Sync + 'static,
{
    fn publish(&self, frame: VisualizationFrame) {
        self(frame);
    }
}

/// Bounded channel sink
///
/// When the consumer falls behind, new frames are dropped rather than
/// stalling the capture thread.
#[derive(Debug)]
pub struct ChannelFrameSink {
    tx: Sender<VisualizationFrame>,
    dropped: AtomicU64,
}

impl ChannelFrameSink {
    /// Frames dropped because the queue was full
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl FrameSink for ChannelFrameSink {
    fn publish(&self, frame: VisualizationFrame) {
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            // Consumer gone; nothing left to deliver to
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

/// Create a bounded frame channel
///
/// A capacity of 0 is raised to 1 so the sink never turns into a rendezvous
/// channel (which would drop every frame).
pub fn frame_channel(capacity: usize) -> (ChannelFrameSink, Receiver<VisualizationFrame>) {
    let (tx, rx) = bounded(capacity.max(1));
    (
        ChannelFrameSink {
            tx,
            dropped: AtomicU64::new(0),
        },
        rx,
    )
}
