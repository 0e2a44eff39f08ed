//! One Euro Filter over the openness value
//!
//! Heavy smoothing while the hand is held still, little lag while it opens
//! or closes: the cutoff rises with the filtered rate of change.
//!
//! Time comes from frame timestamps, not from tick counts, so dropped video
//! frames do not change the filter response.

use std::f32::consts::TAU;

/// Cutoff (Hz) for the rate-of-change estimate
const RATE_CUTOFF: f32 = 1.0;

/// Last accepted sample
#[derive(Clone, Copy, Debug)]
struct Sample {
    t: f64,
    value: f32,
    rate: f32,
}

/// Blend weight of a new sample for a first-order low-pass at `cutoff` Hz
fn blend_weight(dt: f32, cutoff: f32) -> f32 {
    let r = TAU * cutoff * dt;
    r / (r + 1.0)
}

/// Adaptive low-pass filter over a scalar signal
#[derive(Clone, Debug)]
pub struct OneEuroFilter {
    /// Cutoff (Hz) at rest. Lower is smoother.
    min_cutoff: f32,
    /// Cutoff gain per unit/s of change. Higher follows fast motion closer.
    beta: f32,
    last: Option<Sample>,
}

impl OneEuroFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            last: None,
        }
    }

    /// Filter `value` sampled at `t` seconds
    ///
    /// The first finite-time sample passes through and seeds the filter.
    /// A timestamp that is not finite, or that does not move forward, leaves
    /// the state alone and returns the previous output (or `value` when
    /// nothing has been accepted yet).
    pub fn filter(&mut self, t: f64, value: f32) -> f32 {
        if !t.is_finite() {
            return self.last.map_or(value, |s| s.value);
        }

        let Some(prev) = self.last else {
            self.last = Some(Sample { t, value, rate: 0.0 });
            return value;
        };

        let dt = (t - prev.t) as f32;
        if !(dt > 0.0) {
            return prev.value;
        }

        let raw_rate = (value - prev.value) / dt;
        let w_rate = blend_weight(dt, RATE_CUTOFF);
        let rate = prev.rate + w_rate * (raw_rate - prev.rate);

        let cutoff = self.min_cutoff + self.beta * rate.abs();
        let w = blend_weight(dt, cutoff);
        let smoothed = prev.value + w * (value - prev.value);

        self.last = Some(Sample {
            t,
            value: smoothed,
            rate,
        });
        smoothed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
