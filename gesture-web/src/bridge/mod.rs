//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod hand_landmarks;
mod store;

pub use hand_landmarks::{
    create_pipeline,
    shutdown_pipeline,
    reset_pipeline,
    process_hand_landmarks,
    get_openness,
    is_gesture_active,
    gesture_names,
};

pub use store::{
    on_openness,
    on_gesture,
    clear_callbacks,
    JsStorePublisher,
};
