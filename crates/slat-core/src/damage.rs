//! Screen damage accumulation.
//!
//! A process-wide list of rectangles that need redrawing this frame.
//! Decorations append to it as their geometry changes; the render pass
//! tests its own box against it to decide whether painting is needed.
//! Other subsystems contribute damage too, so readers never assume the
//! region only contains their own rects.

use crate::geometry::Rect;

#[derive(Debug, Default)]
pub struct DamageTracker {
    rects: Vec<Rect>,
}

impl DamageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a screen region as needing redraw. Empty rects are ignored.
    pub fn damage_rect(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    /// All rects damaged so far this frame.
    pub fn region(&self) -> &[Rect] {
        &self.rects
    }

    /// Whether any damaged rect overlaps `rect`.
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|r| r.intersects(rect))
    }

    /// Reset at the end of a frame.
    pub fn clear(&mut self) {
        self.rects.clear();
    }
}
