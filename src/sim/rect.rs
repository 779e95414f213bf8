//! Axis-aligned rectangle geometry for entity boxes
//!
//! Screen space: x grows right, y grows down. A rect is its top-left corner
//! plus a size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict interior test: points exactly on an edge are outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.top() && p.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(r.contains_point(Vec2::new(5.0, 5.0)));
        // Edges don't count
        assert!(!r.contains_point(Vec2::new(0.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
        assert!(!r.contains_point(Vec2::new(5.0, 0.0)));
        assert!(!r.contains_point(Vec2::new(5.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(-1.0, 5.0)));
    }
}
