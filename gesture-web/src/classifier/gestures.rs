//! Built-in gestures and the classifier that runs them
//!
//! Machines are independent: nothing stops V-sign and finger-heart from
//! being active on the same tick. Precedence, if wanted, belongs to the
//! consumer of the flags.

use std::num::NonZeroU32;

use super::features::HandFeatures;
use super::machine::{GestureMachine, GestureTest};
use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::landmarks::Finger;

/// Number of built-in gestures
pub const GESTURE_COUNT: usize = 2;

/// Recognized gestures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureId {
    /// Index and middle extended, ring and pinky curled
    VSign = 0,
    /// Thumb and index tips touching, remaining fingers curled
    FingerHeart = 1,
}

impl GestureId {
    pub const ALL: [GestureId; GESTURE_COUNT] = [GestureId::VSign, GestureId::FingerHeart];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used on the JS side
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureId::VSign => "v-sign",
            GestureId::FingerHeart => "finger-heart",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "v-sign" => Some(GestureId::VSign),
            "finger-heart" => Some(GestureId::FingerHeart),
            _ => None,
        }
    }
}

// ============================================================================
// GESTURE TESTS
// ============================================================================

/// Thumb is ignored
#[derive(Clone, Copy, Debug, Default)]
pub struct VSign;

impl GestureTest for VSign {
    fn id(&self) -> GestureId {
        GestureId::VSign
    }

    fn matches(&self, f: &HandFeatures) -> bool {
        f.is_extended(Finger::Index)
            && f.is_extended(Finger::Middle)
            && f.is_curled(Finger::Ring)
            && f.is_curled(Finger::Pinky)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FingerHeart {
    /// Max thumb-to-index tip distance as a multiple of palm scale
    pub pinch_ratio: f32,
}

impl GestureTest for FingerHeart {
    fn id(&self) -> GestureId {
        GestureId::FingerHeart
    }

    fn matches(&self, f: &HandFeatures) -> bool {
        f.pinch_ratio() < self.pinch_ratio
            && f.is_curled(Finger::Middle)
            && f.is_curled(Finger::Ring)
            && f.is_curled(Finger::Pinky)
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

/// Active flag per gesture, indexed by `GestureId`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureFlags([bool; GESTURE_COUNT]);

impl GestureFlags {
    pub fn get(&self, id: GestureId) -> bool {
        self.0[id.index()]
    }

    pub fn set(&mut self, id: GestureId, active: bool) {
        self.0[id.index()] = active;
    }

    pub fn iter(&self) -> impl Iterator<Item = (GestureId, bool)> + '_ {
        GestureId::ALL.iter().map(move |&id| (id, self.get(id)))
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&a| a)
    }
}

pub struct GestureClassifier {
    v_sign: GestureMachine<VSign>,
    finger_heart: GestureMachine<FingerHeart>,
}

impl GestureClassifier {
    /// Fails on a zero debounce window
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let debounce = NonZeroU32::new(config.debounce_ticks)
            .ok_or(ConfigError::DebounceTicks(config.debounce_ticks))?;

        Ok(Self {
            v_sign: GestureMachine::new(VSign, debounce),
            finger_heart: GestureMachine::new(
                FingerHeart {
                    pinch_ratio: config.heart_pinch_ratio,
                },
                debounce,
            ),
        })
    }

    /// Advance every machine one tick. `None` forces all of them inactive.
    pub fn update(&mut self, features: Option<&HandFeatures>) -> GestureFlags {
        let mut flags = GestureFlags::default();
        flags.set(GestureId::VSign, self.v_sign.update(features));
        flags.set(GestureId::FingerHeart, self.finger_heart.update(features));
        flags
    }

    pub fn flags(&self) -> GestureFlags {
        let mut flags = GestureFlags::default();
        flags.set(GestureId::VSign, self.v_sign.is_active());
        flags.set(GestureId::FingerHeart, self.finger_heart.is_active());
        flags
    }

    pub fn reset(&mut self) {
        self.v_sign.reset();
        self.finger_heart.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FeatureExtractor;
    use crate::test_hands::{finger_heart_hand, uniform_hand, v_sign_hand};

    fn features(frame: &crate::landmarks::LandmarkFrame) -> HandFeatures {
        FeatureExtractor::default().extract(frame).unwrap()
    }

    #[test]
    fn test_gesture_names_round_trip() {
        for id in GestureId::ALL {
            assert_eq!(GestureId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(GestureId::from_name("thumbs-up"), None);
    }

    #[test]
    fn test_v_sign_geometry() {
        assert!(VSign.matches(&features(&v_sign_hand())));
        assert!(!VSign.matches(&features(&uniform_hand(2.2, 0.2))));
        assert!(!VSign.matches(&features(&uniform_hand(0.85, 0.2))));
    }

    #[test]
    fn test_finger_heart_geometry() {
        let heart = FingerHeart { pinch_ratio: 0.35 };
        assert!(heart.matches(&features(&finger_heart_hand())));
        assert!(!heart.matches(&features(&v_sign_hand())));
        // open hand: tips far apart and fingers extended
        assert!(!heart.matches(&features(&uniform_hand(2.2, 0.2))));
    }

    #[test]
    fn test_v_sign_active_on_third_tick() {
        let mut classifier = GestureClassifier::new(&PipelineConfig::default()).unwrap();
        let f = features(&v_sign_hand());

        assert!(!classifier.update(Some(&f)).get(GestureId::VSign));
        assert!(!classifier.update(Some(&f)).get(GestureId::VSign));
        assert!(classifier.update(Some(&f)).get(GestureId::VSign));
        assert!(!classifier.flags().get(GestureId::FingerHeart));
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let config = PipelineConfig {
            debounce_ticks: 0,
            ..Default::default()
        };
        assert!(matches!(
            GestureClassifier::new(&config),
            Err(ConfigError::DebounceTicks(0))
        ));
    }

    #[test]
    fn test_hand_loss_clears_every_gesture() {
        let config = PipelineConfig {
            debounce_ticks: 1,
            ..Default::default()
        };
        let mut classifier = GestureClassifier::new(&config).unwrap();
        classifier.update(Some(&features(&v_sign_hand())));
        assert!(classifier.flags().get(GestureId::VSign));

        let flags = classifier.update(None);
        assert!(!flags.any());
    }

    #[test]
    fn test_flags_iter_order() {
        let mut flags = GestureFlags::default();
        flags.set(GestureId::FingerHeart, true);
        let collected: Vec<_> = flags.iter().collect();
        assert_eq!(
            collected,
            vec![(GestureId::VSign, false), (GestureId::FingerHeart, true)]
        );
    }
}
