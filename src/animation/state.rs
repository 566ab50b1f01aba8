use std::time::Instant;

use super::{Animatable, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// Presentation state of one animated property.
///
/// The caller owns the model value; this tracks what is on screen while the
/// presentation catches up with it. Time is always passed in explicitly so a
/// frame driver (or a test) decides what "now" is.
pub struct AnimationState<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Value being animated towards
    target: T,
    /// Value when animation started
    start: T,
    /// Progress from 0.0 to 1.0
    progress: f32,
    /// Time when animation started
    start_time: Option<Instant>,
    transition: Transition,
}

impl<T: Animatable> AnimationState<T> {
    pub fn new(initial_value: T, transition: Transition) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0, // Start completed
            start_time: None,
            transition,
        }
    }

    /// Replace the transition used by the next [`animate_to`](Self::animate_to).
    pub fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Start animating from the current presented value to `new_target`.
    ///
    /// An in-flight animation is superseded: the new one starts wherever the
    /// old one had got to. Zero-length transitions complete immediately.
    /// Re-targeting a [queued](Self::queue_to) animation keeps it queued.
    pub fn animate_to(&mut self, new_target: T, now: Instant) {
        if new_target == self.target {
            return;
        }

        if self.transition.is_instant() {
            self.set_immediate(new_target);
            return;
        }

        // A queued animation has not started yet and keeps waiting for its frame
        let queued = self.progress < 1.0 && self.start_time.is_none();

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = if queued { None } else { Some(now) };
    }

    /// Like [`animate_to`](Self::animate_to), but the animation starts at
    /// the next [`advance`](Self::advance) instead of at a given instant.
    pub fn queue_to(&mut self, new_target: T) {
        if new_target == self.target {
            return;
        }

        if self.transition.is_instant() {
            self.set_immediate(new_target);
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = None;
    }

    /// Advance the animation to `now` and report whether the value changed
    pub fn advance(&mut self, now: Instant) -> AdvanceResult<T> {
        if self.progress >= 1.0 {
            return AdvanceResult::NoChange;
        }
        let start_time = *self.start_time.get_or_insert(now);

        let elapsed = now.saturating_duration_since(start_time).as_secs_f32() * 1000.0;
        let adjusted_elapsed = elapsed - self.transition.delay_ms;
        if adjusted_elapsed <= 0.0 {
            // Still in delay period
            return AdvanceResult::NoChange;
        }

        let t = (adjusted_elapsed / self.transition.duration_ms).min(1.0);
        let new_value = if t >= 1.0 {
            // Land exactly on the target, not on a float approximation of it
            self.target.clone()
        } else {
            T::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
        };
        self.progress = t;

        if new_value == self.current {
            return AdvanceResult::NoChange;
        }
        self.current = new_value.clone();
        AdvanceResult::Changed(new_value)
    }

    /// Check if animation is still running
    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    /// Get current (presented) value
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Get target value
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
        self.start_time = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::TimingFunction;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_settled() {
        let state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        assert!(!state.is_animating());
        assert_eq!(*state.current(), 0.0);
    }

    #[test]
    fn test_linear_progress_and_completion() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        state.animate_to(1.0, t0);
        assert!(state.is_animating());
        assert_eq!(*state.current(), 0.0);

        assert!(state.advance(t0 + ms(50)).is_changed());
        assert!((state.current() - 0.5).abs() < 1e-3);

        assert_eq!(state.advance(t0 + ms(150)), AdvanceResult::Changed(1.0));
        assert!(!state.is_animating());
        assert_eq!(state.advance(t0 + ms(200)), AdvanceResult::NoChange);
    }

    #[test]
    fn test_instant_transition_completes_synchronously() {
        let mut state = AnimationState::new(0.0f32, Transition::instant());
        state.animate_to(1.0, Instant::now());
        assert!(!state.is_animating());
        assert_eq!(*state.current(), 1.0);
    }

    #[test]
    fn test_retarget_starts_from_presented_value() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        state.animate_to(1.0, t0);
        state.advance(t0 + ms(50));
        let midway = *state.current();

        state.animate_to(0.0, t0 + ms(50));
        assert_eq!(*state.target(), 0.0);
        assert_eq!(*state.current(), midway);
        state.advance(t0 + ms(150));
        assert_eq!(*state.current(), 0.0);
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        state.animate_to(1.0, t0);
        state.advance(t0 + ms(60));
        state.animate_to(1.0, t0 + ms(60));
        state.advance(t0 + ms(100));
        assert_eq!(*state.current(), 1.0);
    }

    #[test]
    fn test_queued_animation_starts_at_first_advance() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        state.queue_to(1.0);
        assert!(state.is_animating());

        assert_eq!(state.advance(t0 + ms(3000)), AdvanceResult::NoChange);
        assert_eq!(*state.current(), 0.0);

        state.advance(t0 + ms(3050));
        assert!((state.current() - 0.5).abs() < 1e-3);
        state.advance(t0 + ms(3100));
        assert_eq!(*state.current(), 1.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_retarget_while_queued_stays_queued() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(0.0f32, Transition::new(100.0, TimingFunction::Linear));
        state.queue_to(1.0);
        state.animate_to(0.5, t0);

        state.advance(t0 + ms(1000));
        assert_eq!(*state.current(), 0.0);
        state.advance(t0 + ms(1050));
        assert!((state.current() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let t0 = Instant::now();
        let mut state = AnimationState::new(
            0.0f32,
            Transition::new(100.0, TimingFunction::Linear).delay(50.0),
        );
        state.animate_to(1.0, t0);
        assert_eq!(state.advance(t0 + ms(30)), AdvanceResult::NoChange);
        state.advance(t0 + ms(100));
        assert!((state.current() - 0.5).abs() < 1e-3);
    }
}
