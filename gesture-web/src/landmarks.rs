//! Hand landmark frame - one MediaPipe Hand Landmarker result
//!
//! 21 points in normalized image coordinates, z is depth relative to the wrist.

use nalgebra::Point3;

use crate::error::FrameError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat JS buffer (x, y, z per landmark)
pub const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

/// Fingertips, thumb first
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Base joint of each finger, thumb first. The thumb has no MCP knuckle
/// on the palm so its CMC joint stands in.
pub const FINGER_BASES: [usize; 5] = [THUMB_CMC, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// Finger order used by every per-finger array in the crate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn tip(self) -> usize {
        FINGERTIPS[self.index()]
    }

    pub fn base(self) -> usize {
        FINGER_BASES[self.index()]
    }
}

// ============================================================================
// FRAME
// ============================================================================

/// Immutable snapshot of one detected hand
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Point3<f32>; LANDMARK_COUNT],
    /// Capture time in seconds
    timestamp: f64,
}

impl LandmarkFrame {
    pub fn new(points: [Point3<f32>; LANDMARK_COUNT], timestamp: f64) -> Result<Self, FrameError> {
        if !timestamp.is_finite() {
            return Err(FrameError::NonFiniteTimestamp(timestamp));
        }
        if let Some(i) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(FrameError::NonFinite(i));
        }
        Ok(Self { points, timestamp })
    }

    /// Build from a slice that must hold exactly 21 points
    pub fn from_points(points: &[Point3<f32>], timestamp: f64) -> Result<Self, FrameError> {
        let points: [Point3<f32>; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| FrameError::LandmarkCount(points.len()))?;
        Self::new(points, timestamp)
    }

    /// Build from 63 floats laid out `[x0, y0, z0, x1, ...]`
    pub fn from_flat(data: &[f32], timestamp: f64) -> Result<Self, FrameError> {
        if data.len() != FLOATS_PER_HAND {
            return Err(FrameError::BufferLength {
                hands: 1,
                expected: FLOATS_PER_HAND,
                actual: data.len(),
            });
        }

        let mut points = [Point3::origin(); LANDMARK_COUNT];
        for (point, xyz) in points.iter_mut().zip(data.chunks_exact(3)) {
            *point = Point3::new(xyz[0], xyz[1], xyz[2]);
        }
        Self::new(points, timestamp)
    }

    pub fn point(&self, index: usize) -> &Point3<f32> {
        &self.points[index]
    }

    pub fn points(&self) -> &[Point3<f32>; LANDMARK_COUNT] {
        &self.points
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Euclidean distance between two landmarks
    pub fn distance(&self, a: usize, b: usize) -> f32 {
        nalgebra::distance(&self.points[a], &self.points[b])
    }
}
