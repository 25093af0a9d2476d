//! Shape Dodge - a shape-shifting arena survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player forms, hazards, projectiles, session rules)
//! - `game_loop`: Frame driver that feeds the simulation and dispatches its events
//! - `platform`: Input key map and collaborator seams (audio, effects, render host)
//! - `persistence`: Key-value storage backends for the settings blob
//! - `settings`: Player preferences

pub mod audio;
pub mod game_loop;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game_loop::GameLoop;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical arena dimensions (independent of display resolution)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Where the player lands after walking through the portal
    pub const HUB_EXIT_X: f32 = 100.0;
    pub const HUB_EXIT_Y: f32 = 360.0;

    /// Dash form
    pub const DASH_DURATION_TICKS: u32 = 10;
    pub const DASH_COOLDOWN_TICKS: u32 = 40;
    pub const DASH_SPEED: f32 = 18.0;

    /// Spin form
    pub const SPIN_DURATION_TICKS: u32 = 15;
    /// Shared between spins, owned by the session
    pub const SPIN_COOLDOWN_TICKS: u32 = 30;
    /// Spin kill radius as a multiple of player size
    pub const SPIN_RADIUS_FACTOR: f32 = 1.8;

    /// Ranged form projectiles
    pub const PROJECTILE_SPEED: f32 = 12.0;
    pub const PROJECTILE_RADIUS: f32 = 6.0;

    /// Hazards
    pub const HAZARD_SIZE: f32 = 30.0;
    pub const HAZARD_SPEED: f32 = 2.0;
    /// Spawn cadence in the combat room (~1 second)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    /// Distance outside the arena edge where hazards appear
    pub const SPAWN_EDGE_OFFSET: f32 = 40.0;
    /// Points per destroyed hazard, regardless of how it died
    pub const HAZARD_POINTS: u64 = 2;

    /// Session rules
    pub const MAX_HITS: u32 = 3;
    pub const INVULNERABILITY_TICKS: u32 = 60;
    /// How long the "transform first" notice stays up
    pub const NOTICE_TICKS: u32 = 60;

    /// Hub pickups: a row near the top, portal on the right
    pub const PICKUP_ROW_Y: f32 = 100.0;
    pub const PICKUP_START_X: f32 = 340.0;
    pub const PICKUP_SPACING: f32 = 200.0;
    pub const PICKUP_SIZE: f32 = 30.0;
    pub const PORTAL_X: f32 = 1200.0;
    pub const PORTAL_Y: f32 = 335.0;
    pub const PORTAL_SIZE: f32 = 50.0;
}

/// Center of the arena in logical coordinates
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of the vector from `from` to `to` (radians, atan2 convention)
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
