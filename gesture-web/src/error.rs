//! Error types for frame ingestion and pipeline configuration

use thiserror::Error;

/// A landmark frame that cannot be turned into a `LandmarkFrame`.
///
/// Never escapes a tick: the pipeline logs it and skips the update.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("expected {expected} floats for {hands} hand(s), got {actual}")]
    BufferLength {
        hands: usize,
        expected: usize,
        actual: usize,
    },

    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),

    #[error("frame timestamp {0} is not finite")]
    NonFiniteTimestamp(f64),
}

/// Rejected pipeline configuration. Raised at construction, never clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("closed ratio {closed} must be below open ratio {open}")]
    RatioOrder { closed: f32, open: f32 },

    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("smoothing factor must be in (0, 1], got {0}")]
    SmoothingFactor(f32),

    #[error("debounce must be at least 1 tick, got {0}")]
    DebounceTicks(u32),

    #[error("{name} must be in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
}
