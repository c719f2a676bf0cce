//! Positioned circle, the leaf geometry under every bubble
//!
//! The radius is whole pixels and clamped non-negative on every write; the
//! pop animation steps it one pixel per tick, down to exactly zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle at a pixel position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point in screen pixels
    pub center: Vec2,
    radius: i32,
}

impl Circle {
    pub fn new(center: Vec2, radius: i32) -> Self {
        Self {
            center,
            radius: radius.max(0),
        }
    }

    /// Radius in pixels, always >= 0
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Set the radius; negative input is coerced to 0
    #[inline]
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
    }

    /// Sprite edge length for this circle (2r)
    #[inline]
    pub fn diameter(&self) -> i32 {
        self.radius * 2
    }
}
