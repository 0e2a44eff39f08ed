//! Gesture Web - hand landmarks to particle control signals
//!
//! Turns MediaPipe hand landmarks into:
//! - an openness value in [0, 1] (fist to spread hand)
//! - debounced gesture flags (V-sign, finger-heart)
//!
//! The core (`landmarks`, `classifier`, `signal`, `pipeline`) is plain Rust.
//! `bridge` holds the wasm_bindgen entry points the web app calls once per
//! video frame; results go back to the app's store through JS callbacks.

pub mod bridge;
pub mod classifier;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod pipeline;
pub mod publisher;
pub mod signal;

#[cfg(test)]
mod test_hands;

use wasm_bindgen::prelude::*;

pub use classifier::{GestureFlags, GestureId};
pub use config::{MissingHandPolicy, PipelineConfig, Smoothing};
pub use error::{ConfigError, FrameError};
pub use landmarks::LandmarkFrame;
pub use pipeline::{Pipeline, TickOutput};
pub use publisher::{ChangeFilter, SignalPublisher};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// `level`: "trace", "debug", "info", "warn" or "error"
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("Hand signal logging at {}", log_level);
}
