//! Axis-aligned rectangle geometry
//!
//! Screen coordinate convention: origin top-left, y increases downward.
//! Every collidable entity reduces to a `Rect` for hit testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Whether a point lies inside the rectangle (used for button hit tests)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x && point.x < self.right() && point.y > self.pos.y && point.y < self.bottom()
    }
}

/// Strict AABB overlap test
///
/// Returns true iff the projections overlap on both axes with strict
/// inequality: rectangles that share only an edge or a corner do not collide.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(a, b));
    }

    #[test]
    fn test_disjoint_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(a, b));
    }

    #[test]
    fn test_shared_edge_is_not_a_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(a, b));

        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(a, below));
    }

    #[test]
    fn test_contained_rect() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(overlaps(outer, inner));
        assert!(overlaps(inner, outer));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.1f32..200.0,
            0.1f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        #[test]
        fn prop_rect_overlaps_itself(a in arb_rect()) {
            prop_assert!(overlaps(a, a));
        }

        #[test]
        fn prop_horizontal_separation_never_overlaps(a in arb_rect(), gap in 0.0f32..100.0) {
            let b = Rect::new(a.right() + gap, a.pos.y, a.size.x, a.size.y);
            prop_assert!(!overlaps(a, b));
        }
    }
}
