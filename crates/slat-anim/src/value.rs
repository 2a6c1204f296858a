//! Goal-driven animated values.
//!
//! An [`AnimatedValue`] interpolates from its value at retarget time toward
//! a goal over a configured duration. Owners call [`AnimatedValue::advance`]
//! once per frame and use the returned change flag to drive dirty tracking;
//! completion is observed by polling [`AnimatedValue::is_settled`] rather
//! than through callbacks, which keeps ownership simple on the single
//! render thread.

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;

/// Types that can be interpolated between two values.
pub trait Interpolate: Copy + PartialEq {
    /// Interpolated value at factor `t` (0.0 = self, 1.0 = to).
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Duration and curve applied to an animated property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Interpolation duration in milliseconds. Zero disables interpolation.
    pub duration_ms: f32,
    /// Timing curve.
    pub easing: EasingFunction,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: EasingFunction::default(),
        }
    }
}

/// A value that eases toward its goal over time.
#[derive(Debug, Clone)]
pub struct AnimatedValue<T: Interpolate> {
    from: T,
    goal: T,
    current: T,
    elapsed_ms: f32,
    settled: bool,
    config: AnimationConfig,
}

impl<T: Interpolate> AnimatedValue<T> {
    /// Create a settled value with no animation in flight.
    pub fn new(initial: T, config: AnimationConfig) -> Self {
        Self {
            from: initial,
            goal: initial,
            current: initial,
            elapsed_ms: 0.0,
            settled: true,
            config,
        }
    }

    /// Start animating toward `goal` from the current value.
    ///
    /// A goal equal to the existing one is a no-op, so repeated identical
    /// assignments never restart an in-flight animation.
    pub fn set_goal(&mut self, goal: T) {
        if goal == self.goal {
            return;
        }

        self.from = self.current;
        self.goal = goal;
        self.elapsed_ms = 0.0;
        self.settled = false;
    }

    /// Instantly become `value`, cancelling any in-flight animation.
    pub fn warp_to(&mut self, value: T) {
        self.from = value;
        self.goal = value;
        self.current = value;
        self.settled = true;
    }

    /// Snap the current value to the existing goal.
    pub fn warp(&mut self) {
        self.warp_to(self.goal);
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn goal(&self) -> T {
        self.goal
    }

    /// Whether the value has reached its goal with no animation in flight.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Step the animation by `dt_ms`. Returns whether the current value
    /// changed this frame.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if self.settled {
            return false;
        }

        self.elapsed_ms += dt_ms;

        let done = self.config.duration_ms <= 0.0 || self.elapsed_ms >= self.config.duration_ms;
        let next = if done {
            self.settled = true;
            self.goal
        } else {
            let t = self.config.easing.evaluate(self.elapsed_ms / self.config.duration_ms);
            self.from.interpolate(&self.goal, t)
        };

        let changed = next != self.current;
        self.current = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn linear(duration_ms: f32) -> AnimationConfig {
        AnimationConfig {
            duration_ms,
            easing: EasingFunction::Linear,
        }
    }

    #[test]
    fn test_new_value_is_settled() {
        let v = AnimatedValue::new(0.5f32, linear(100.0));
        assert!(v.is_settled());
        assert_eq!(v.current(), 0.5);
        assert_eq!(v.goal(), 0.5);
    }

    #[test]
    fn test_advance_interpolates_to_goal() {
        let mut v = AnimatedValue::new(0.0f32, linear(100.0));
        v.set_goal(1.0);
        assert!(!v.is_settled());

        assert!(v.advance(50.0));
        assert!(approx_eq(v.current(), 0.5));

        assert!(v.advance(50.0));
        assert!(approx_eq(v.current(), 1.0));
        assert!(v.is_settled());

        // Settled values report no further change.
        assert!(!v.advance(16.0));
    }

    #[test]
    fn test_identical_goal_does_not_restart() {
        let mut v = AnimatedValue::new(0.0f32, linear(100.0));
        v.set_goal(1.0);
        v.advance(50.0);

        v.set_goal(1.0);
        assert!(approx_eq(v.current(), 0.5));

        v.advance(50.0);
        assert!(v.is_settled());
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut v = AnimatedValue::new(0.0f32, linear(100.0));
        v.set_goal(1.0);
        v.advance(50.0);

        v.set_goal(0.0);
        assert!(approx_eq(v.current(), 0.5));

        v.advance(50.0);
        assert!(approx_eq(v.current(), 0.25));

        v.advance(50.0);
        assert!(approx_eq(v.current(), 0.0));
        assert!(v.is_settled());
    }

    #[test]
    fn test_warp_skips_interpolation() {
        let mut v = AnimatedValue::new(0.0f32, linear(100.0));
        v.set_goal(1.0);
        v.warp();
        assert!(v.is_settled());
        assert_eq!(v.current(), 1.0);

        v.warp_to(0.25);
        assert!(v.is_settled());
        assert_eq!(v.current(), 0.25);
        assert_eq!(v.goal(), 0.25);
    }

    #[test]
    fn test_zero_duration_settles_on_first_advance() {
        let mut v = AnimatedValue::new(0.0f32, linear(0.0));
        v.set_goal(1.0);
        assert!(v.advance(0.0));
        assert!(v.is_settled());
        assert_eq!(v.current(), 1.0);
    }

    #[test]
    fn test_goal_to_same_value_as_current_still_settles() {
        let mut v = AnimatedValue::new(0.0f32, linear(100.0));
        v.set_goal(1.0);
        v.warp();

        // Goal back to where we already are: animates 1.0 -> 0.0.
        v.set_goal(0.0);
        assert!(!v.is_settled());
        v.advance(100.0);
        assert!(v.is_settled());
        assert_eq!(v.current(), 0.0);
    }
}
