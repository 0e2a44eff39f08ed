//! Output side of the pipeline
//!
//! A `SignalPublisher` is whatever stores the signals for the renderer and UI
//! (in the browser: the app's reactive store). The pipeline calls each setter
//! exactly once per tick.

use crate::classifier::{GestureId, GESTURE_COUNT};

pub trait SignalPublisher {
    /// `value` is always in [0, 1]
    fn set_openness(&mut self, value: f32);
    fn set_gesture_active(&mut self, gesture: GestureId, active: bool);
}

impl<P: SignalPublisher + ?Sized> SignalPublisher for &mut P {
    fn set_openness(&mut self, value: f32) {
        (**self).set_openness(value);
    }

    fn set_gesture_active(&mut self, gesture: GestureId, active: bool) {
        (**self).set_gesture_active(gesture, active);
    }
}

/// Forwards only values that differ from the last one forwarded
///
/// Reactive stores re-render subscribers on every write, so repeated
/// identical writes are dropped here.
pub struct ChangeFilter<P> {
    inner: P,
    openness: Option<f32>,
    gestures: [Option<bool>; GESTURE_COUNT],
}

impl<P: SignalPublisher> ChangeFilter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            openness: None,
            gestures: [None; GESTURE_COUNT],
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    /// Forget what was sent so the next tick writes every signal
    pub fn invalidate(&mut self) {
        self.openness = None;
        self.gestures = [None; GESTURE_COUNT];
    }
}

impl<P: SignalPublisher> SignalPublisher for ChangeFilter<P> {
    fn set_openness(&mut self, value: f32) {
        if self.openness != Some(value) {
            self.openness = Some(value);
            self.inner.set_openness(value);
        }
    }

    fn set_gesture_active(&mut self, gesture: GestureId, active: bool) {
        let last = &mut self.gestures[gesture.index()];
        if *last != Some(active) {
            *last = Some(active);
            self.inner.set_gesture_active(gesture, active);
        }
    }
}

/// Publisher that records every call, for tests
#[cfg(test)]
#[derive(Default, Debug)]
pub(crate) struct RecordingPublisher {
    pub openness: Vec<f32>,
    pub gestures: Vec<(GestureId, bool)>,
}

#[cfg(test)]
impl SignalPublisher for RecordingPublisher {
    fn set_openness(&mut self, value: f32) {
        self.openness.push(value);
    }

    fn set_gesture_active(&mut self, gesture: GestureId, active: bool) {
        self.gestures.push((gesture, active));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_filter_drops_repeats() {
        let mut filter = ChangeFilter::new(RecordingPublisher::default());
        filter.set_openness(0.5);
        filter.set_openness(0.5);
        filter.set_openness(0.6);
        filter.set_gesture_active(GestureId::VSign, false);
        filter.set_gesture_active(GestureId::VSign, false);
        filter.set_gesture_active(GestureId::FingerHeart, false);
        filter.set_gesture_active(GestureId::VSign, true);

        assert_eq!(filter.inner().openness, vec![0.5, 0.6]);
        assert_eq!(
            filter.inner().gestures,
            vec![
                (GestureId::VSign, false),
                (GestureId::FingerHeart, false),
                (GestureId::VSign, true),
            ]
        );
    }

    #[test]
    fn test_invalidate_resends() {
        let mut filter = ChangeFilter::new(RecordingPublisher::default());
        filter.set_openness(1.0);
        filter.invalidate();
        filter.set_openness(1.0);
        assert_eq!(filter.inner().openness, vec![1.0, 1.0]);
    }
}
