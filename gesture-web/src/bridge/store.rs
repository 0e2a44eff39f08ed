//! JS store publisher
//!
//! The app keeps its signals in a reactive store on the JS side. JS registers
//! one callback per signal kind and Rust calls them at most once per tick,
//! only when the value changed.

use wasm_bindgen::prelude::*;
use std::cell::RefCell;
use crate::classifier::GestureId;
use crate::publisher::{ChangeFilter, SignalPublisher};

/// Forwards signals to JS callbacks
#[derive(Default)]
pub struct JsStorePublisher {
    on_openness: Option<js_sys::Function>,
    on_gesture: Option<js_sys::Function>,
}

impl SignalPublisher for JsStorePublisher {
    fn set_openness(&mut self, value: f32) {
        if let Some(callback) = &self.on_openness {
            let arg = JsValue::from_f64(value as f64);
            if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
                log::warn!("openness callback threw: {:?}", err);
            }
        }
    }

    fn set_gesture_active(&mut self, gesture: GestureId, active: bool) {
        if let Some(callback) = &self.on_gesture {
            let name = JsValue::from_str(gesture.as_str());
            if let Err(err) = callback.call2(&JsValue::NULL, &name, &JsValue::from_bool(active)) {
                log::warn!("gesture callback threw: {:?}", err);
            }
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static STORE: RefCell<ChangeFilter<JsStorePublisher>> =
        RefCell::new(ChangeFilter::new(JsStorePublisher::default()));
}

/// Run `f` against the store publisher. Returns `None` if a callback is
/// re-entering the store.
pub(crate) fn with_store<R>(f: impl FnOnce(&mut ChangeFilter<JsStorePublisher>) -> R) -> Option<R> {
    STORE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut store) => Some(f(&mut store)),
        Err(_) => {
            log::warn!("Signal store is busy, a callback re-entered the bridge");
            None
        }
    })
}

// ============================================================================
// WASM API
// ============================================================================

/// Register `callback(openness: number)`, e.g. the store's `setHandOpenness`
#[wasm_bindgen]
pub fn on_openness(callback: js_sys::Function) {
    with_store(|store| {
        store.inner_mut().on_openness = Some(callback);
        store.invalidate();
    });
}

/// Register `callback(gesture: string, active: boolean)`
#[wasm_bindgen]
pub fn on_gesture(callback: js_sys::Function) {
    with_store(|store| {
        store.inner_mut().on_gesture = Some(callback);
        store.invalidate();
    });
}

/// Drop both callbacks
#[wasm_bindgen]
pub fn clear_callbacks() {
    with_store(|store| {
        *store.inner_mut() = JsStorePublisher::default();
        store.invalidate();
    });
}
