//! Polled input snapshot and press-edge detection
//!
//! The simulation never subscribes to events. Each tick it reads one
//! `TickInput` (what is held right now) and compares it against the previous
//! tick's snapshot to find press edges for discrete actions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Primary action (left mouse button)
    Fire,
    /// Accept a transformation while standing on a pickup (Space)
    Confirm,
    /// Activate the selected menu item (Enter)
    Select,
    /// Escape
    Cancel,
    /// P
    Pause,
    /// Arrow keys in menus
    NavUp,
    NavDown,
}

/// Input state for a single tick
///
/// `Default` is "nothing held, pointer unknown", which is also what the
/// simulation falls back to when the host has nothing to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub confirm: bool,
    pub select: bool,
    pub cancel: bool,
    pub pause: bool,
    pub nav_up: bool,
    pub nav_down: bool,
    /// Last known pointer position in world coordinates
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Is this control currently held?
    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::MoveUp => self.move_up,
            Control::MoveDown => self.move_down,
            Control::MoveLeft => self.move_left,
            Control::MoveRight => self.move_right,
            Control::Fire => self.fire,
            Control::Confirm => self.confirm,
            Control::Select => self.select,
            Control::Cancel => self.cancel,
            Control::Pause => self.pause,
            Control::NavUp => self.nav_up,
            Control::NavDown => self.nav_down,
        }
    }

    /// Pointer position, if the host reported a usable one
    pub fn aim(&self) -> Option<Vec2> {
        self.pointer.filter(|p| p.is_finite())
    }

    /// Movement axes from the held direction keys (each axis in {-1, 0, 1})
    pub fn movement_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.move_up {
            axes.y -= 1.0;
        }
        if self.move_down {
            axes.y += 1.0;
        }
        if self.move_left {
            axes.x -= 1.0;
        }
        if self.move_right {
            axes.x += 1.0;
        }
        axes
    }
}

/// Press edges between two consecutive snapshots
#[derive(Debug, Clone, Copy)]
pub struct InputEdges<'a> {
    prev: &'a TickInput,
    current: &'a TickInput,
}

impl<'a> InputEdges<'a> {
    pub fn new(prev: &'a TickInput, current: &'a TickInput) -> Self {
        Self { prev, current }
    }

    /// Went from not-held to held this tick
    pub fn pressed(&self, control: Control) -> bool {
        self.current.is_held(control) && !self.prev.is_held(control)
    }

    /// Any of the given controls was pressed this tick
    pub fn any_pressed(&self, controls: &[Control]) -> bool {
        controls.iter().any(|&c| self.pressed(c))
    }
}
