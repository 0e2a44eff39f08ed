//! Hand openness estimation
//!
//! Mean fingertip-to-wrist distance over palm size gives a ratio that is
//! ~0.9 for a fist and ~2.0 for a spread hand. That ratio is mapped linearly
//! onto [0, 1], clamped, and optionally smoothed.
//!
//! Bad ticks (no hand, degenerate palm, NaN) never reach the published value:
//! the last good value is reused instead.

use super::one_euro::OneEuroFilter;
use crate::classifier::HandFeatures;
use crate::config::{MissingHandPolicy, PipelineConfig, Smoothing};

/// Per-tick filter state for the configured `Smoothing`
#[derive(Clone, Debug)]
enum Smoother {
    Instant,
    Exponential { factor: f32, last: Option<f32> },
    OneEuro(OneEuroFilter),
}

impl Smoother {
    fn new(smoothing: Smoothing) -> Self {
        match smoothing {
            Smoothing::Instant => Smoother::Instant,
            Smoothing::Exponential { factor } => Smoother::Exponential { factor, last: None },
            Smoothing::OneEuro { min_cutoff, beta } => {
                Smoother::OneEuro(OneEuroFilter::new(min_cutoff, beta))
            }
        }
    }

    fn apply(&mut self, x: f32, t: f64) -> f32 {
        match self {
            Smoother::Instant => x,
            Smoother::Exponential { factor, last } => {
                let y = match *last {
                    Some(prev) => prev + *factor * (x - prev),
                    None => x,
                };
                *last = Some(y);
                y
            }
            Smoother::OneEuro(filter) => filter.filter(t, x),
        }
    }

    fn reset(&mut self) {
        match self {
            Smoother::Instant => {}
            Smoother::Exponential { last, .. } => *last = None,
            Smoother::OneEuro(filter) => filter.reset(),
        }
    }
}

/// Maps hand features to a smoothed openness in [0, 1]
#[derive(Clone, Debug)]
pub struct OpennessEstimator {
    closed_ratio: f32,
    open_ratio: f32,
    missing_hand: MissingHandPolicy,
    initial: f32,
    smoother: Smoother,
    /// Last published value
    value: f32,
}

impl OpennessEstimator {
    /// Expects a validated config
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            closed_ratio: config.closed_ratio,
            open_ratio: config.open_ratio,
            missing_hand: config.missing_hand,
            initial: config.initial_openness,
            smoother: Smoother::new(config.smoothing),
            value: config.initial_openness,
        }
    }

    /// Linear ratio-to-openness map, `None` if the ratio is not a number
    pub fn map_ratio(&self, ratio: f32) -> Option<f32> {
        if !ratio.is_finite() {
            return None;
        }
        let t = (ratio - self.closed_ratio) / (self.open_ratio - self.closed_ratio);
        t.is_finite().then(|| t.clamp(0.0, 1.0))
    }

    /// Advance one tick and return the value to publish
    pub fn update(&mut self, features: Option<&HandFeatures>) -> f32 {
        let Some(features) = features else {
            if let MissingHandPolicy::ResetTo { value } = self.missing_hand {
                self.value = value;
                self.smoother.reset();
            }
            return self.value;
        };

        let ratio = features.ratio();
        let Some(target) = self.map_ratio(ratio) else {
            log::debug!("Skipping openness update, ratio {} not finite", ratio);
            return self.value;
        };

        let smoothed = self.smoother.apply(target, features.timestamp);
        if smoothed.is_finite() {
            self.value = smoothed.clamp(0.0, 1.0);
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Back to the initial value with empty filter history
    pub fn reset(&mut self) {
        self.value = self.initial;
        self.smoother.reset();
    }
}
