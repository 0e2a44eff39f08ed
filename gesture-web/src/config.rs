//! Pipeline configuration
//!
//! Every field has a default, so JS can pass `{}` or only the knobs it cares
//! about. Validation happens once, before the pipeline is built.

use serde::Deserialize;

use crate::error::ConfigError;

/// Temporal filter applied to the openness value
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Smoothing {
    /// Publish the mapped value as-is
    #[default]
    Instant,
    /// One-pole low-pass: `y += factor * (x - y)`, factor in (0, 1]
    Exponential { factor: f32 },
    /// Adaptive low-pass keyed on frame timestamps
    #[serde(rename_all = "camelCase")]
    OneEuro { min_cutoff: f32, beta: f32 },
}

/// What openness does on ticks with no detected hand
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MissingHandPolicy {
    /// Keep the last published value
    #[default]
    Hold,
    /// Jump to a fixed value and drop smoothing history
    ResetTo { value: f32 },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Tip/palm ratio mapped to openness 0
    pub closed_ratio: f32,
    /// Tip/palm ratio mapped to openness 1
    pub open_ratio: f32,
    pub smoothing: Smoothing,
    /// Consecutive positive ticks before a gesture becomes active
    pub debounce_ticks: u32,
    pub missing_hand: MissingHandPolicy,
    /// Openness published before the first hand is seen
    pub initial_openness: f32,
    /// A finger is extended when tip-to-wrist exceeds this multiple of base-to-wrist
    pub extension_ratio: f32,
    /// Finger-heart fires when thumb-to-index tip distance is below this multiple of palm size
    pub heart_pinch_ratio: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            closed_ratio: 0.9,
            open_ratio: 2.0,
            smoothing: Smoothing::Instant,
            debounce_ticks: 3,
            missing_hand: MissingHandPolicy::Hold,
            initial_openness: 1.0,
            extension_ratio: 1.0,
            heart_pinch_ratio: 0.35,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("closedRatio", self.closed_ratio)?;
        positive("openRatio", self.open_ratio)?;
        if self.closed_ratio >= self.open_ratio {
            return Err(ConfigError::RatioOrder {
                closed: self.closed_ratio,
                open: self.open_ratio,
            });
        }

        match self.smoothing {
            Smoothing::Instant => {}
            Smoothing::Exponential { factor } => {
                if !(factor > 0.0 && factor <= 1.0) {
                    return Err(ConfigError::SmoothingFactor(factor));
                }
            }
            Smoothing::OneEuro { min_cutoff, beta } => {
                positive("minCutoff", min_cutoff)?;
                if !(beta.is_finite() && beta >= 0.0) {
                    return Err(ConfigError::NotPositive { name: "beta", value: beta });
                }
            }
        }

        if self.debounce_ticks < 1 {
            return Err(ConfigError::DebounceTicks(self.debounce_ticks));
        }

        unit("initialOpenness", self.initial_openness)?;
        if let MissingHandPolicy::ResetTo { value } = self.missing_hand {
            unit("missingHand.value", value)?;
        }

        positive("extensionRatio", self.extension_ratio)?;
        positive("heartPinchRatio", self.heart_pinch_ratio)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}
