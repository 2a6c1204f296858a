//! Easing curves for animation timing.
//!
//! Implements the CSS timing functions (`linear`, `ease`, `ease-in`,
//! `ease-out`, `ease-in-out`) plus arbitrary cubic beziers, so the
//! animation section of the config file can name a curve directly.

use serde::{Deserialize, Serialize};

/// Easing function mapping linear progress (0.0 to 1.0) to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing.
    Linear,
    /// CSS `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
    /// CSS `ease-in`: `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// CSS `ease-out`: `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// CSS `ease-in-out`: `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// Custom curve through control points (x1, y1) and (x2, y2).
    /// x values must lie in [0, 1].
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::EaseOut
    }
}

impl EasingFunction {
    /// Evaluate the curve at progress `t`, clamped to [0, 1].
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
        }
    }

    /// Build a custom cubic bezier curve.
    ///
    /// # Panics
    /// Panics if `x1` or `x2` lie outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

/// Evaluate a cubic bezier timing curve at the given progress.
///
/// Finds the curve parameter matching the input x via Newton-Raphson,
/// then evaluates y there.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t = (t - x / dx).clamp(0.0, 1.0);
    }

    t
}

/// One axis of the bezier: 3(1-t)²t·c1 + 3(1-t)t²·c2 + t³
#[inline]
fn bezier_component(c1: f32, c2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let mt = 1.0 - t;

    3.0 * mt * mt * t * c1 + 3.0 * mt * t2 * c2 + t2 * t
}

#[inline]
fn bezier_derivative(c1: f32, c2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}
