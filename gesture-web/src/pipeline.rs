//! Per-tick landmark-to-signal transform
//!
//! Frame -> features -> (openness, gesture flags) -> publisher.
//! All state that survives between ticks lives in `Pipeline`.

use crate::classifier::{FeatureExtractor, GestureClassifier, GestureFlags};
use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::landmarks::LandmarkFrame;
use crate::publisher::SignalPublisher;
use crate::signal::OpennessEstimator;

/// What one tick produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutput {
    pub openness: f32,
    pub gestures: GestureFlags,
}

pub struct Pipeline {
    config: PipelineConfig,
    extractor: FeatureExtractor,
    openness: OpennessEstimator,
    gestures: GestureClassifier,
    ticks: u64,
}

impl Pipeline {
    /// Refuses to build from an invalid config
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            extractor: FeatureExtractor::new(config.extension_ratio),
            openness: OpennessEstimator::new(&config),
            gestures: GestureClassifier::new(&config)?,
            ticks: 0,
            config,
        })
    }

    /// Run one tick. `None` means no hand was detected.
    ///
    /// A frame with degenerate geometry is skipped: openness and gesture
    /// states stay where they were.
    pub fn tick(&mut self, frame: Option<&LandmarkFrame>) -> TickOutput {
        self.ticks += 1;

        let features = match frame {
            None => None,
            Some(frame) => match self.extractor.extract(frame) {
                Some(features) => Some(features),
                None => {
                    log::debug!("Tick {}: degenerate palm, skipping", self.ticks);
                    return self.output();
                }
            },
        };

        let openness = self.openness.update(features.as_ref());
        let gestures = self.gestures.update(features.as_ref());
        TickOutput { openness, gestures }
    }

    /// Run one tick and push the result, one write per signal
    pub fn tick_and_publish<P: SignalPublisher>(
        &mut self,
        frame: Option<&LandmarkFrame>,
        publisher: &mut P,
    ) -> TickOutput {
        let output = self.tick(frame);
        publish(&output, publisher);
        output
    }

    /// Count a tick whose input could not be parsed, without touching state
    pub fn skip_tick(&mut self) -> TickOutput {
        self.ticks += 1;
        self.output()
    }

    /// Current signals without advancing
    pub fn output(&self) -> TickOutput {
        TickOutput {
            openness: self.openness.value(),
            gestures: self.gestures.flags(),
        }
    }

    pub fn reset(&mut self) {
        self.openness.reset();
        self.gestures.reset();
        self.ticks = 0;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

/// Write every signal of `output` to `publisher`
pub fn publish<P: SignalPublisher>(output: &TickOutput, publisher: &mut P) {
    publisher.set_openness(output.openness);
    for (gesture, active) in output.gestures.iter() {
        publisher.set_gesture_active(gesture, active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GestureId;
    use crate::config::Smoothing;
    use crate::publisher::RecordingPublisher;
    use crate::test_hands::{degenerate_hand, finger_heart_hand, uniform_hand, v_sign_hand};

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = PipelineConfig {
            smoothing: Smoothing::Exponential { factor: 2.0 },
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::new(config),
            Err(ConfigError::SmoothingFactor(_))
        ));
    }

    #[test]
    fn test_fist_and_open_hand() {
        let mut p = pipeline();
        assert_eq!(p.tick(Some(&uniform_hand(0.85, 0.2))).openness, 0.0);
        assert_eq!(p.tick(Some(&uniform_hand(2.2, 0.2))).openness, 1.0);
    }

    #[test]
    fn test_v_sign_sustained_three_ticks() {
        let mut p = pipeline();
        let frame = v_sign_hand();
        assert!(!p.tick(Some(&frame)).gestures.get(GestureId::VSign));
        assert!(!p.tick(Some(&frame)).gestures.get(GestureId::VSign));
        assert!(p.tick(Some(&frame)).gestures.get(GestureId::VSign));
    }

    #[test]
    fn test_finger_heart_sustained() {
        let mut p = pipeline();
        let frame = finger_heart_hand();
        let mut out = p.tick(Some(&frame));
        for _ in 0..2 {
            out = p.tick(Some(&frame));
        }
        assert!(out.gestures.get(GestureId::FingerHeart));
        assert!(!out.gestures.get(GestureId::VSign));
    }

    #[test]
    fn test_no_hand_holds_openness_and_clears_gestures() {
        let mut p = pipeline();
        let frame = v_sign_hand();
        let mut last = p.tick(Some(&frame));
        for _ in 0..5 {
            last = p.tick(Some(&frame));
        }
        assert!(last.gestures.get(GestureId::VSign));

        let out = p.tick(None);
        assert_eq!(out.openness, last.openness);
        assert!(!out.gestures.any());
    }

    #[test]
    fn test_degenerate_frame_changes_nothing() {
        let mut p = pipeline();
        let frame = v_sign_hand();
        p.tick(Some(&frame));
        p.tick(Some(&frame));
        let before = p.output();

        let out = p.tick(Some(&degenerate_hand()));
        assert_eq!(out, before);
        assert!(out.openness.is_finite());

        // the V-sign streak survived the bad frame
        assert!(p.tick(Some(&frame)).gestures.get(GestureId::VSign));
    }

    #[test]
    fn test_publishes_once_per_signal_per_tick() {
        let mut p = pipeline();
        let mut publisher = RecordingPublisher::default();
        p.tick_and_publish(Some(&uniform_hand(1.45, 0.2)), &mut publisher);
        p.tick_and_publish(None, &mut publisher);

        assert_eq!(publisher.openness.len(), 2);
        assert_eq!(publisher.gestures.len(), 2 * GestureId::ALL.len());
        assert_eq!(publisher.openness[0], publisher.openness[1]);
    }

    #[test]
    fn test_skip_tick_keeps_state() {
        let mut p = pipeline();
        p.tick(Some(&uniform_hand(0.85, 0.2)));
        let out = p.skip_tick();
        assert_eq!(out.openness, 0.0);
        assert_eq!(p.ticks(), 2);
    }

    #[test]
    fn test_reset() {
        let mut p = pipeline();
        p.tick(Some(&uniform_hand(0.85, 0.2)));
        p.reset();
        assert_eq!(p.output().openness, 1.0);
        assert_eq!(p.ticks(), 0);
    }
}
