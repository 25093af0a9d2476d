//! Overlap tests for the arena's simple shapes
//!
//! Every entity is an axis-aligned square (top-left origin) except projectiles,
//! which are circles. Nothing here resolves collisions, it only answers
//! "do these overlap".

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Square with side `side` at `pos`
    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::new(pos, Vec2::splat(side))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }

    /// Overlap with a circle, via the closest point on the rectangle
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        rect_circle_overlap(self, center, radius)
    }
}

/// Axis-aligned rectangle overlap
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.pos.x < b_max.x && a_max.x > b.pos.x && a.pos.y < b_max.y && a_max.y > b.pos.y
}

/// Rectangle vs circle: clamp the circle center into the rectangle and
/// compare the squared distance against the squared radius
#[inline]
pub fn rect_circle_overlap(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let closest = center.clamp(rect.pos, rect.max());
    center.distance_squared(closest) < radius * radius
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Is `p` inside the closed arena rectangle [0, W] x [0, H]?
#[inline]
pub fn in_arena(p: Vec2) -> bool {
    (0.0..=ARENA_WIDTH).contains(&p.x) && (0.0..=ARENA_HEIGHT).contains(&p.y)
}

/// Clamp a square's top-left corner so the whole square stays in the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, size: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, (ARENA_WIDTH - size).max(0.0)),
        pos.y.clamp(0.0, (ARENA_HEIGHT - size).max(0.0)),
    )
}
