//! Signal module - continuous openness value and its smoothing filters
//!
//! Re-exports only. All logic in submodules.

mod one_euro;
mod openness;

pub use one_euro::OneEuroFilter;
pub use openness::OpennessEstimator;
