//! Hand landmark entry point and pipeline lifecycle
//!
//! JS hands over the MediaPipe Hand Landmarker result as a flat
//! `Float32Array` (`num_hands * 21 * 3` floats). Only the first hand drives
//! the signals. Each call is one tick.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;
use crate::config::PipelineConfig;
use crate::error::{ConfigError, FrameError};
use crate::landmarks::{LandmarkFrame, FLOATS_PER_HAND};
use crate::classifier::GestureId;
use crate::pipeline::{self, Pipeline, TickOutput};
use super::store::with_store;

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&format!("Invalid pipeline config: {}", err))
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static PIPELINE: RefCell<Option<Pipeline>> = RefCell::new(None);
}

/// Pull the first hand out of the flat buffer
///
/// `Ok(None)` is the "no hand this tick" marker.
pub(crate) fn parse_first_hand(
    flat_data: &[f32],
    num_hands: usize,
    timestamp: f64,
) -> Result<Option<LandmarkFrame>, FrameError> {
    if num_hands == 0 {
        return Ok(None);
    }

    // num_hands comes from JS, the product can overflow usize on wasm32
    let expected = num_hands.checked_mul(FLOATS_PER_HAND);
    let first_hand = match expected {
        Some(expected) if flat_data.len() >= expected => &flat_data[..FLOATS_PER_HAND],
        _ => {
            return Err(FrameError::BufferLength {
                hands: num_hands,
                expected: expected.unwrap_or(usize::MAX),
                actual: flat_data.len(),
            })
        }
    };

    LandmarkFrame::from_flat(first_hand, timestamp).map(Some)
}

/// `performance.now()` in seconds, wall clock if unavailable
fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or_else(|| js_sys::Date::now() / 1000.0)
}

fn with_pipeline<R>(f: impl FnOnce(&mut Pipeline) -> R) -> Option<R> {
    PIPELINE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

// ============================================================================
// WASM API
// ============================================================================

/// Build (or rebuild) the pipeline from a JS config object
///
/// All fields are optional, `undefined` gives the defaults. An invalid config
/// is rejected and the previous pipeline, if any, is left running.
#[wasm_bindgen]
pub fn create_pipeline(config: JsValue) -> Result<(), JsValue> {
    let config: PipelineConfig = if config.is_undefined() || config.is_null() {
        PipelineConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid pipeline config: {}", e)))?
    };

    let pipeline = Pipeline::new(config)?;
    log::info!("Hand signal pipeline ready: {:?}", pipeline.config());

    PIPELINE.with(|cell| *cell.borrow_mut() = Some(pipeline));
    with_store(|store| store.invalidate());
    Ok(())
}

/// Tear the pipeline down. Later ticks are ignored until it is recreated.
#[wasm_bindgen]
pub fn shutdown_pipeline() {
    PIPELINE.with(|cell| cell.borrow_mut().take());
    log::info!("Hand signal pipeline shut down");
}

/// Clear smoothing and gesture state, keep the config
#[wasm_bindgen]
pub fn reset_pipeline() {
    with_pipeline(|p| p.reset());
}

/// Run one tick and publish to the registered callbacks
///
/// - `flat_data`: landmarks, 63 floats per hand
/// - `num_hands`: 0 when nothing was detected this frame
/// - `timestamp_ms`: frame time, `performance.now()` when omitted
///
/// Returns the openness after this tick, `undefined` with no pipeline.
#[wasm_bindgen]
pub fn process_hand_landmarks(
    flat_data: &[f32],
    num_hands: usize,
    timestamp_ms: Option<f64>,
) -> Option<f32> {
    let timestamp = timestamp_ms.map(|ms| ms / 1000.0).unwrap_or_else(now_seconds);
    let frame = parse_first_hand(flat_data, num_hands, timestamp);

    let output: Option<TickOutput> = with_pipeline(|p| match &frame {
        Ok(frame) => p.tick(frame.as_ref()),
        Err(err) => {
            log::warn!("Skipping hand frame: {}", err);
            p.skip_tick()
        }
    });

    let Some(output) = output else {
        log::warn!("Hand landmarks received before create_pipeline");
        return None;
    };

    // pipeline borrow is released before JS callbacks run
    with_store(|store| pipeline::publish(&output, store));
    Some(output.openness)
}

/// Last published openness, `undefined` with no pipeline
#[wasm_bindgen]
pub fn get_openness() -> Option<f32> {
    with_pipeline(|p| p.output().openness)
}

/// Whether the named gesture (`"v-sign"`, `"finger-heart"`) is active
#[wasm_bindgen]
pub fn is_gesture_active(name: &str) -> bool {
    let Some(gesture) = GestureId::from_name(name) else {
        log::warn!("Unknown gesture: {}", name);
        return false;
    };
    with_pipeline(|p| p.output().gestures.get(gesture)).unwrap_or(false)
}

/// Names of all built-in gestures
#[wasm_bindgen]
pub fn gesture_names() -> Vec<JsValue> {
    GestureId::ALL
        .iter()
        .map(|g| JsValue::from_str(g.as_str()))
        .collect()
}
