//! Axis-aligned rectangles
//!
//! Position is the bottom-left corner; size is fixed at construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Zero-positioned box of the given size
    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Closed-interval overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    /// Open-interval overlap test; touching edges do not count
    pub fn overlaps_interior(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Keep the box inside `[0, bounds.x - width] x [0, bounds.y - height]`
    ///
    /// A box larger than the bounds is pinned to the origin on that axis.
    pub fn clamp_within(&mut self, bounds: Vec2) {
        self.x = self.x.min(bounds.x - self.width).max(0.0);
        self.y = self.y.min(bounds.y - self.height).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlaps_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_edge_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 5.0, 5.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(a.overlaps(&right));
        assert!(a.overlaps(&corner));
        assert!(!a.overlaps_interior(&right));
        assert!(!a.overlaps_interior(&corner));
    }

    #[test]
    fn test_overlaps_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // X intervals intersect, Y do not
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(1.0, 2.0, -3.0, 4.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 4.0);
    }

    #[test]
    fn test_translate_and_set_position() {
        let mut r = Rect::with_size(3.0, 3.0);
        r.translate(Vec2::new(2.0, -1.0));
        assert_eq!(r.position(), Vec2::new(2.0, -1.0));
        r.set_position(Vec2::new(7.0, 8.0));
        assert_eq!(r.position(), Vec2::new(7.0, 8.0));
        assert_eq!(r.size(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Vec2::new(100.0, 50.0);
        let mut r = Rect::new(-5.0, 60.0, 3.0, 3.0);
        r.clamp_within(bounds);
        assert_eq!(r.position(), Vec2::new(0.0, 47.0));

        let mut r = Rect::new(120.0, -1.0, 3.0, 3.0);
        r.clamp_within(bounds);
        assert_eq!(r.position(), Vec2::new(97.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_clamp_is_idempotent(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            w in 0.0f32..50.0,
            h in 0.0f32..50.0,
        ) {
            let bounds = Vec2::new(200.0, 150.0);
            let mut r = Rect::new(x, y, w, h);
            r.clamp_within(bounds);
            prop_assert!(r.x >= 0.0 && r.x <= bounds.x - w);
            prop_assert!(r.y >= 0.0 && r.y <= bounds.y - h);

            let once = r;
            r.clamp_within(bounds);
            prop_assert_eq!(once, r);
        }

        #[test]
        fn prop_in_range_clamp_is_noop(
            x in 0.0f32..150.0,
            y in 0.0f32..100.0,
        ) {
            let mut r = Rect::new(x, y, 10.0, 10.0);
            let before = r;
            r.clamp_within(Vec2::new(160.0, 110.0));
            prop_assert_eq!(before, r);
        }
    }
}
