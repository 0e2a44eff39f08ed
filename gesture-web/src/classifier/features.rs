//! Scale-invariant hand features
//!
//! Everything the openness estimator and the gesture tests need, computed
//! once per frame. Distances are raw; callers divide by `palm_scale`.

use crate::landmarks::{Finger, LandmarkFrame, INDEX_TIP, MIDDLE_MCP, THUMB_TIP, WRIST};

/// Palm scales below this are treated as a failed detection
pub const PALM_EPSILON: f32 = 1e-6;

/// Derived per-frame measurements. Never mutated after extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFeatures {
    /// Wrist to middle-finger MCP
    pub palm_scale: f32,
    /// Wrist to each fingertip, thumb first
    pub tip_distances: [f32; 5],
    /// Wrist to each finger base, thumb first
    pub base_distances: [f32; 5],
    /// Thumb tip to index tip
    pub pinch_distance: f32,
    /// Tip further from the wrist than `extension_ratio` x base
    pub extended: [bool; 5],
    /// Capture time of the source frame in seconds
    pub timestamp: f64,
}

impl HandFeatures {
    /// Mean tip-to-wrist distance over palm scale
    pub fn ratio(&self) -> f32 {
        let mean = self.tip_distances.iter().sum::<f32>() / self.tip_distances.len() as f32;
        mean / self.palm_scale
    }

    /// Thumb-to-index tip distance over palm scale
    pub fn pinch_ratio(&self) -> f32 {
        self.pinch_distance / self.palm_scale
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.extended[finger.index()]
    }

    pub fn is_curled(&self, finger: Finger) -> bool {
        !self.is_extended(finger)
    }
}

/// Pure feature extraction from a landmark frame
#[derive(Clone, Copy, Debug)]
pub struct FeatureExtractor {
    extension_ratio: f32,
}

impl FeatureExtractor {
    pub fn new(extension_ratio: f32) -> Self {
        Self { extension_ratio }
    }

    /// Returns `None` for degenerate geometry (palm scale ~ 0)
    pub fn extract(&self, frame: &LandmarkFrame) -> Option<HandFeatures> {
        let palm_scale = frame.distance(WRIST, MIDDLE_MCP);
        if !palm_scale.is_finite() || palm_scale < PALM_EPSILON {
            return None;
        }

        let tip_distances = Finger::ALL.map(|f| frame.distance(WRIST, f.tip()));
        let base_distances = Finger::ALL.map(|f| frame.distance(WRIST, f.base()));

        let mut extended = [false; 5];
        for (i, flag) in extended.iter_mut().enumerate() {
            *flag = tip_distances[i] > self.extension_ratio * base_distances[i];
        }

        Some(HandFeatures {
            palm_scale,
            tip_distances,
            base_distances,
            pinch_distance: frame.distance(THUMB_TIP, INDEX_TIP),
            extended,
            timestamp: frame.timestamp(),
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(1.0)
    }
}
