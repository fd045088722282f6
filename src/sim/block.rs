//! Rectangular obstacles
//!
//! A block is an axis-aligned rectangle. Turtles are pushed out of blocks and
//! missiles explode on contact with them.
//!
//! Arena coordinates grow downward, so `bottom` is the smaller y value (the
//! top edge on screen) and `top` the larger one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An immutable axis-aligned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
}

impl Block {
    /// Create a block, ordering the bounds so that left <= right and
    /// bottom <= top.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            bottom: bottom.min(top),
            top: bottom.max(top),
        }
    }

    /// Block centered on a point with the given half-extents
    pub fn centered(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self::new(
            center.x - half_width,
            center.x + half_width,
            center.y - half_height,
            center.y + half_height,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.left
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.right
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Whether a point lies inside the block, boundary included when `closed`
    pub fn contains(&self, point: Vec2, closed: bool) -> bool {
        if closed {
            point.x >= self.left
                && point.x <= self.right
                && point.y >= self.bottom
                && point.y <= self.top
        } else {
            point.x > self.left
                && point.x < self.right
                && point.y > self.bottom
                && point.y < self.top
        }
    }

    #[inline]
    pub fn contains_closed(&self, point: Vec2) -> bool {
        self.contains(point, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_ordered() {
        let b = Block::new(50.0, 10.0, 80.0, 20.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 50.0);
        assert_eq!(b.bottom(), 20.0);
        assert_eq!(b.top(), 80.0);
        assert_eq!(b.center(), Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_contains_closed_and_open() {
        let b = Block::new(0.0, 10.0, 0.0, 10.0);
        assert!(b.contains(Vec2::new(5.0, 5.0), true));
        assert!(b.contains(Vec2::new(5.0, 5.0), false));

        // Edge points only count when closed
        assert!(b.contains(Vec2::new(0.0, 5.0), true));
        assert!(!b.contains(Vec2::new(0.0, 5.0), false));
        assert!(b.contains(Vec2::new(10.0, 10.0), true));
        assert!(!b.contains(Vec2::new(10.0, 10.0), false));

        assert!(!b.contains(Vec2::new(10.5, 5.0), true));
        assert!(!b.contains(Vec2::new(5.0, -0.5), true));
    }

    #[test]
    fn test_degenerate_block_contains_its_line() {
        let b = Block::new(5.0, 5.0, 0.0, 10.0);
        assert_eq!(b.width(), 0.0);
        assert!(b.contains(Vec2::new(5.0, 3.0), true));
        assert!(!b.contains(Vec2::new(5.0, 3.0), false));
    }
}
