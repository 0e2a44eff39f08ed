//! Debounced gesture state machine
//!
//! One machine per gesture. The gesture-specific part is a boolean test over
//! `HandFeatures`; the machine only counts consecutive hits.
//!
//! ```text
//!   Inactive --hit--> Candidate --hit x N--> Active
//!       ^                 |                    |
//!       +------miss-------+--------miss--------+
//! ```

use std::num::NonZeroU32;

use super::features::HandFeatures;
use super::gestures::GestureId;

/// Per-tick geometric test for one gesture
pub trait GestureTest {
    fn id(&self) -> GestureId;
    fn matches(&self, features: &HandFeatures) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Inactive,
    /// Test is passing but has not yet held for the debounce window
    Candidate,
    Active,
}

pub struct GestureMachine<T> {
    test: T,
    state: GestureState,
    /// Consecutive ticks the test has passed
    streak: u32,
    /// Ticks required to go active
    debounce: u32,
}

impl<T: GestureTest> GestureMachine<T> {
    /// `debounce`: consecutive hits needed to go active, counting the first
    pub fn new(test: T, debounce: NonZeroU32) -> Self {
        Self {
            test,
            state: GestureState::Inactive,
            streak: 0,
            debounce: debounce.get(),
        }
    }

    /// Advance one tick. `None` means no hand this tick.
    pub fn update(&mut self, features: Option<&HandFeatures>) -> bool {
        match features {
            Some(f) => {
                let hit = self.test.matches(f);
                self.observe(hit);
            }
            None => self.reset(),
        }
        self.is_active()
    }

    /// Feed one test result through the transitions
    pub fn observe(&mut self, hit: bool) -> GestureState {
        if !hit {
            if self.state == GestureState::Active {
                log::debug!("Gesture released: {}", self.test.id().as_str());
            }
            self.state = GestureState::Inactive;
            self.streak = 0;
            return self.state;
        }

        self.streak = self.streak.saturating_add(1);
        if self.state != GestureState::Active {
            if self.streak >= self.debounce {
                self.state = GestureState::Active;
                log::debug!(
                    "Gesture active: {} after {} ticks",
                    self.test.id().as_str(),
                    self.streak
                );
            } else {
                self.state = GestureState::Candidate;
            }
        }
        self.state
    }

    /// Force back to Inactive (hand lost)
    pub fn reset(&mut self) {
        if self.state == GestureState::Active {
            log::debug!("Gesture dropped with hand: {}", self.test.id().as_str());
        }
        self.state = GestureState::Inactive;
        self.streak = 0;
    }

    pub fn is_active(&self) -> bool {
        self.state == GestureState::Active
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn id(&self) -> GestureId {
        self.test.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test double whose result is driven by the caller via `observe`
    struct Never;

    impl GestureTest for Never {
        fn id(&self) -> GestureId {
            GestureId::VSign
        }

        fn matches(&self, _: &HandFeatures) -> bool {
            false
        }
    }

    fn ticks(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_starts_inactive() {
        let machine = GestureMachine::new(Never, ticks(3));
        assert_eq!(machine.state(), GestureState::Inactive);
        assert!(!machine.is_active());
    }

    #[test]
    fn test_n_minus_one_hits_never_activate() {
        let mut machine = GestureMachine::new(Never, ticks(3));
        assert_eq!(machine.observe(true), GestureState::Candidate);
        assert_eq!(machine.observe(true), GestureState::Candidate);
        assert_eq!(machine.observe(false), GestureState::Inactive);
        assert!(!machine.is_active());

        // streak restarts after the miss
        assert_eq!(machine.observe(true), GestureState::Candidate);
        assert_eq!(machine.observe(true), GestureState::Candidate);
        assert!(!machine.is_active());
    }

    #[test]
    fn test_n_hits_activate_on_nth_tick() {
        let mut machine = GestureMachine::new(Never, ticks(3));
        machine.observe(true);
        machine.observe(true);
        assert_eq!(machine.observe(true), GestureState::Active);
        assert_eq!(machine.observe(true), GestureState::Active);
    }

    #[test]
    fn test_release_is_immediate() {
        let mut machine = GestureMachine::new(Never, ticks(2));
        machine.observe(true);
        machine.observe(true);
        assert!(machine.is_active());
        assert_eq!(machine.observe(false), GestureState::Inactive);
    }

    #[test]
    fn test_debounce_of_one() {
        let mut machine = GestureMachine::new(Never, ticks(1));
        assert_eq!(machine.observe(true), GestureState::Active);
    }

    #[test]
    fn test_missing_hand_resets() {
        let mut machine = GestureMachine::new(Never, ticks(1));
        machine.observe(true);
        assert!(machine.is_active());
        assert!(!machine.update(None));
        assert_eq!(machine.state(), GestureState::Inactive);
    }
}
