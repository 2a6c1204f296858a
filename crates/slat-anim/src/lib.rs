//! slat-anim: goal-driven animated values for the tab-bar decoration engine.
//!
//! An [`AnimatedValue`] holds a current value and a goal. Assigning a new
//! goal starts (or retargets) an eased interpolation; [`AnimatedValue::warp`]
//! skips it. Values are advanced once per frame from the host's render
//! thread, so everything here is plain single-threaded state.

pub mod easing;
pub mod value;

pub use easing::EasingFunction;
pub use value::{AnimatedValue, AnimationConfig, Interpolate};
