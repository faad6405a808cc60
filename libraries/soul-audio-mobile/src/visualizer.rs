//! Waveform capture session
//!
//! Owns at most one hardware capture resource. Each capture tick runs the
//! reducer on the capture thread and hands the frame to the sink:
//!
//! ```text
//! start(session)
//!   create ─► disable ─► capture size (max) ─► waveform callback (max rate) ─► enable
//!
//! capture tick (capture thread)
//!   raw [i8; capture_size] ─► reduce into 64 slots ─► FrameSink::publish
//!
//! stop()
//!   disable ─► release        (idempotent, never fails)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use soul_audio::visualization::reduce_waveform_into;
use soul_core::{
    AudioSessionId, HardwareVisualizer, Result, VisualizationFrame, VisualizerProvider,
};
use tracing::{debug, info, warn};

use crate::config::VisualizerConfig;
use crate::handoff::FrameSink;

/// Active capture resource
struct ActiveCapture {
    session: AudioSessionId,
    handle: Box<dyn HardwareVisualizer>,
}

/// Visualization capture session
pub struct VisualizationSession {
    provider: Arc<dyn VisualizerProvider>,
    sink: Arc<dyn FrameSink>,
    config: VisualizerConfig,
    active: Option<ActiveCapture>,
    frames_published: Arc<AtomicU64>,
}

impl VisualizationSession {
    /// Create a stopped session
    pub fn new(
        provider: Arc<dyn VisualizerProvider>,
        sink: Arc<dyn FrameSink>,
        config: VisualizerConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            config,
            active: None,
            frames_published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start capturing for an audio session
    ///
    /// Any previous capture is stopped first. On failure the partially
    /// configured resource is released and the session stays stopped.
    pub fn start(&mut self, session: AudioSessionId) -> Result<()> {
        self.stop();

        let mut handle = self.provider.create_visualizer(session)?;
        if let Err(e) = self.configure(handle.as_mut()) {
            warn!("Failed to start visualizer for session {}: {}", session, e);
            if let Err(release_err) = handle.release() {
                debug!("Visualizer release after failed start: {}", release_err);
            }
            return Err(e);
        }

        info!("Visualizer started for session {}", session);
        self.active = Some(ActiveCapture { session, handle });
        Ok(())
    }

    fn configure(&self, handle: &mut dyn HardwareVisualizer) -> Result<()> {
        handle.set_enabled(false)?;

        let (min_size, max_size) = handle.capture_size_range();
        let capture_size = self
            .config
            .capture_size
            .map_or(max_size, |size| size.max(min_size).min(max_size));
        handle.set_capture_size(capture_size)?;

        if capture_size < self.config.slots {
            warn!(
                "Capture size {} is smaller than {} slots; frames will be silent",
                capture_size, self.config.slots
            );
        }

        let max_rate = handle.max_capture_rate();
        let rate = self
            .config
            .capture_rate_millihertz
            .map_or(max_rate, |rate| rate.min(max_rate));

        // Scratch slots reused across ticks; each frame copies them once
        let mut levels = vec![0u8; self.config.slots];
        let sink = Arc::clone(&self.sink);
        let published = Arc::clone(&self.frames_published);
        handle.register_waveform_callback(
            rate,
            Box::new(move |raw: &[i8]| {
                reduce_waveform_into(raw, &mut levels);
                sink.publish(VisualizationFrame::new(&levels[..]));
                published.fetch_add(1, Ordering::Relaxed);
            }),
        )?;

        debug!(
            "Visualizer configured: capture size {}, rate {} mHz, {} slots",
            capture_size, rate, self.config.slots
        );

        handle.set_enabled(true)
    }

    /// Stop capturing and release the resource
    ///
    /// Safe to call when not started. Errors from the platform are logged
    /// and swallowed.
    pub fn stop(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };

        if let Err(e) = active.handle.set_enabled(false) {
            debug!("Visualizer disable failed: {}", e);
        }
        if let Err(e) = active.handle.release() {
            debug!("Visualizer release failed: {}", e);
        }

        info!("Visualizer stopped for session {}", active.session);
    }

    /// Whether a capture resource is held
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Session currently being captured
    pub fn session(&self) -> Option<AudioSessionId> {
        self.active.as_ref().map(|a| a.session)
    }

    /// Frames published since this session object was created
    pub fn frames_published(&self) -> u64 {
        self.frames_published.load(Ordering::Relaxed)
    }

    /// Capture configuration
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }
}

impl Drop for VisualizationSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for VisualizationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualizationSession")
            .field("session", &self.session())
            .field("config", &self.config)
            .field("frames_published", &self.frames_published())
            .finish_non_exhaustive()
    }
}
