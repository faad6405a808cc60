/// Core error types for the Soul visualizer engine
use thiserror::Error;

/// Result type alias using `SoulError`
pub type Result<T> = std::result::Result<T, SoulError>;

/// Core error type
#[derive(Error, Debug)]
pub enum SoulError {
    /// The platform refused to create an audio effect instance
    #[error("Hardware unavailable: {0}")]
    HardwareUnavailable(String),

    /// A call into an acquired hardware effect failed
    #[error("Hardware error: {0}")]
    Hardware(String),

    /// The resource was already released
    #[error("{0} has been released")]
    Released(&'static str),

    /// Settings store errors
    #[error("Settings error: {0}")]
    Settings(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Media transport errors
    #[error("Playback error: {0}")]
    Playback(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SoulError {
    /// Create a hardware-unavailable error
    pub fn hardware_unavailable(msg: impl Into<String>) -> Self {
        Self::HardwareUnavailable(msg.into())
    }

    /// Create a hardware error
    pub fn hardware(msg: impl Into<String>) -> Self {
        Self::Hardware(msg.into())
    }

    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }
}
