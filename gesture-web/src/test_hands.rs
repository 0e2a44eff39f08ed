//! Synthetic hands for tests
//!
//! Every finger base sits `palm` away from the wrist, so a finger's
//! tip-to-wrist ratio is also its tip-to-base-distance ratio.

use nalgebra::{Point3, Vector3};

use crate::landmarks::{LandmarkFrame, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

/// Spread of each finger from the wrist, thumb first (radians from straight up)
const SPREAD: [f32; 5] = [-0.9, -0.3, 0.0, 0.3, 0.6];

/// Hand whose finger `i` tip is `ratios[i] * palm` from the wrist
pub fn hand_at(ratios: [f32; 5], palm: f32, timestamp: f64) -> LandmarkFrame {
    let wrist = Point3::new(0.5, 0.8, 0.0);
    let mut points = [wrist; LANDMARK_COUNT];

    for (finger, (&angle, &ratio)) in SPREAD.iter().zip(ratios.iter()).enumerate() {
        let dir = Vector3::new(angle.sin(), -angle.cos(), 0.0);
        let base = 1 + finger * 4;
        let tip_len = ratio * palm;
        // base, two intermediate joints, tip
        for step in 0..4 {
            let t = step as f32 / 3.0;
            let len = palm + (tip_len - palm) * t;
            points[base + step] = wrist + dir * len;
        }
    }

    LandmarkFrame::new(points, timestamp).unwrap()
}

pub fn hand_with_ratios(ratios: [f32; 5], palm: f32) -> LandmarkFrame {
    hand_at(ratios, palm, 0.0)
}

/// All five tips at `ratio * palm`
pub fn uniform_hand(ratio: f32, palm: f32) -> LandmarkFrame {
    hand_at([ratio; 5], palm, 0.0)
}

/// Index and middle at 1.3x, ring and pinky at 0.6x
pub fn v_sign_hand() -> LandmarkFrame {
    hand_with_ratios([0.8, 1.3, 1.3, 0.6, 0.6], 0.2)
}

/// Thumb tip touching the index tip, other three fingers curled
pub fn finger_heart_hand() -> LandmarkFrame {
    let palm = 0.2;
    let frame = hand_with_ratios([1.0, 1.0, 0.6, 0.6, 0.6], palm);
    let mut points = *frame.points();
    points[THUMB_TIP] = points[INDEX_TIP] + Vector3::new(0.05 * palm, 0.0, 0.0);
    LandmarkFrame::new(points, 0.0).unwrap()
}

/// Middle MCP collapsed onto the wrist
pub fn degenerate_hand() -> LandmarkFrame {
    LandmarkFrame::new([Point3::new(0.5, 0.5, 0.0); LANDMARK_COUNT], 0.0).unwrap()
}
