//! Classifier module - hand features and debounced gesture machines
//!
//! Re-exports only. All logic in submodules.

mod features;
mod gestures;
mod machine;

pub use features::{FeatureExtractor, HandFeatures, PALM_EPSILON};
pub use gestures::{
    FingerHeart, GestureClassifier, GestureFlags, GestureId, VSign, GESTURE_COUNT,
};
pub use machine::{GestureMachine, GestureState, GestureTest};
