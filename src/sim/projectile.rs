//! Projectile store
//!
//! Owns every live projectile. Projectiles fly in a straight line and die when
//! they leave the arena or hit a hazard; they never refer back to the shooter.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::in_arena;
use crate::consts::PROJECTILE_RADIUS;

/// Who fired a projectile (render hosts use it for color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    #[default]
    Player,
}

/// A projectile entity (circle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Circle center
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    pub origin: ProjectileOrigin,
}

/// All live projectiles
#[derive(Debug, Clone, Default)]
pub struct ProjectileStore {
    projectiles: Vec<Projectile>,
}

impl ProjectileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player projectile at `pos` moving by `vel` every tick
    pub fn spawn(&mut self, pos: Vec2, vel: Vec2) {
        self.projectiles.push(Projectile {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            origin: ProjectileOrigin::Player,
        });
    }

    /// Integrate every projectile by its velocity and drop the ones that left
    /// the arena
    pub fn advance(&mut self) {
        self.projectiles.retain_mut(|p| {
            p.pos += p.vel;
            in_arena(p.pos)
        });
    }

    /// Remove and return the projectile at `index`
    pub fn remove(&mut self, index: usize) -> Projectile {
        self.projectiles.remove(index)
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}
