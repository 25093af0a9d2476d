//! Keyboard and pointer state
//!
//! Hosts forward raw key names (DOM `KeyboardEvent.key` values) and pointer
//! events; the frame driver polls [`KeyMap::snapshot`] once per frame.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::TickInput;
use crate::sim::geometry::in_arena;

/// Held keys plus pointer state
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    held: HashSet<String>,
    pointer: Option<Vec2>,
    primary_down: bool,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        if key == "Shift" {
            return;
        }
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        if key == "Shift" {
            return;
        }
        self.held.remove(key);
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    fn any_down(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Pointer moved to `world` (arena coordinates); non-finite positions are ignored
    pub fn pointer_moved(&mut self, world: Vec2) {
        if world.is_finite() {
            self.pointer = Some(world);
        }
    }

    pub fn pointer_down(&mut self) {
        self.primary_down = true;
    }

    pub fn pointer_up(&mut self) {
        self.primary_down = false;
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
        self.primary_down = false;
    }

    /// Input for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            move_up: self.any_down(&["w", "W"]),
            move_down: self.any_down(&["s", "S"]),
            move_left: self.any_down(&["a", "A"]),
            move_right: self.any_down(&["d", "D"]),
            fire: self.primary_down,
            confirm: self.any_down(&[" ", "Space"]),
            select: self.is_down("Enter"),
            cancel: self.is_down("Escape"),
            pause: self.any_down(&["p", "P"]),
            nav_up: self.is_down("ArrowUp"),
            nav_down: self.is_down("ArrowDown"),
            pointer: self.pointer,
        }
    }
}

/// Letterboxed mapping from a canvas of any size onto the fixed arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in pixels
    pub canvas: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            canvas: Vec2::new(width, height),
        }
    }

    /// Uniform scale that fits the whole arena
    pub fn scale(&self) -> f32 {
        (self.canvas.x / ARENA_WIDTH).min(self.canvas.y / ARENA_HEIGHT)
    }

    /// Arena offset (in arena units) that centers it in the canvas
    pub fn offset(&self) -> Vec2 {
        let scale = self.scale();
        (self.canvas / scale - Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)) / 2.0
    }

    /// Canvas pixel to arena coordinates
    ///
    /// `None` for a degenerate canvas or a pixel in the letterbox bars.
    pub fn to_world(&self, screen: Vec2) -> Option<Vec2> {
        let scale = self.scale();
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let world = screen / scale - self.offset();
        in_arena(world).then_some(world)
    }
}
