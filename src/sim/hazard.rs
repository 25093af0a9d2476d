//! Hazard store and enemy AI
//!
//! Hazards are squares that home in on the player. Each tick runs, in order:
//! seek, pairwise separation, projectile hits, spin and dash kills, and
//! finally contact damage against the player. Outcomes are reported as a list
//! of [`Contact`]s; scoring and health belong to the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::player::Player;
use super::projectile::ProjectileStore;
use crate::consts::{
    ARENA_HEIGHT, ARENA_WIDTH, HAZARD_POINTS, HAZARD_SIZE, SPAWN_EDGE_OFFSET, SPIN_RADIUS_FACTOR,
};

/// An enemy square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Units per tick
    pub speed: f32,
}

impl Hazard {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

/// How a hazard was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    Projectile,
    Spin,
    Dash,
}

/// Something that happened between hazards and the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// A hazard was removed; `pos` is where its center was
    HazardDestroyed {
        pos: Vec2,
        cause: KillCause,
        points: u64,
    },
    /// A hazard is touching a vulnerable player
    PlayerHit { pos: Vec2 },
}

/// Arena edge a hazard can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Left,
        SpawnEdge::Right,
        SpawnEdge::Top,
        SpawnEdge::Bottom,
    ];

    /// Spawn point just outside this edge; `along` in [0, 1) picks the
    /// position along the edge
    pub fn spawn_point(self, along: f32) -> Vec2 {
        let along = along.clamp(0.0, 1.0);
        match self {
            SpawnEdge::Left => Vec2::new(-SPAWN_EDGE_OFFSET, along * ARENA_HEIGHT),
            SpawnEdge::Right => Vec2::new(ARENA_WIDTH + SPAWN_EDGE_OFFSET, along * ARENA_HEIGHT),
            SpawnEdge::Top => Vec2::new(along * ARENA_WIDTH, -SPAWN_EDGE_OFFSET),
            SpawnEdge::Bottom => Vec2::new(along * ARENA_WIDTH, ARENA_HEIGHT + SPAWN_EDGE_OFFSET),
        }
    }
}

/// All live hazards. Order carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct HazardStore {
    hazards: Vec<Hazard>,
}

impl HazardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, pos: Vec2, speed: f32) {
        self.hazards.push(Hazard {
            pos,
            size: HAZARD_SIZE,
            speed,
        });
    }

    /// Run one tick of hazard behavior against the player and the live
    /// projectiles. Destroyed hazards and consumed projectiles are removed
    /// before this returns.
    pub fn advance(&mut self, player: &Player, projectiles: &mut ProjectileStore) -> Vec<Contact> {
        let mut contacts = Vec::new();

        self.seek(player.center());
        self.separate();
        self.resolve_projectiles(projectiles, &mut contacts);

        if player.spin_attack_active() {
            let center = player.center();
            let radius = player.size * SPIN_RADIUS_FACTOR;
            self.destroy_where(KillCause::Spin, &mut contacts, |h| {
                h.center().distance(center) <= radius
            });
        }

        if player.is_dashing() {
            let bounds = player.bounds();
            self.destroy_where(KillCause::Dash, &mut contacts, |h| {
                h.bounds().overlaps(&bounds)
            });
        }

        if !player.is_form_invulnerable() {
            let bounds = player.bounds();
            // One hit per touching hazard; the session decides what counts
            contacts.extend(
                self.hazards
                    .iter()
                    .filter(|h| h.bounds().overlaps(&bounds))
                    .map(|_| Contact::PlayerHit {
                        pos: player.center(),
                    }),
            );
        }

        contacts
    }

    /// Move every hazard `speed` units toward `target`
    fn seek(&mut self, target: Vec2) {
        for hazard in &mut self.hazards {
            // Already on target: stay put rather than divide by zero
            if let Some(dir) = (target - hazard.center()).try_normalize() {
                hazard.pos += dir * hazard.speed;
            }
        }
    }

    /// One relaxation pass pushing overlapping pairs apart by half the overlap each
    fn separate(&mut self) {
        let n = self.hazards.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.hazards.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];

                let delta = a.center() - b.center();
                let dist = delta.length();
                let min_dist = (a.size + b.size) / 2.0;
                if dist < min_dist {
                    let dir = delta.try_normalize().unwrap_or(Vec2::X);
                    let push = dir * ((min_dist - dist) / 2.0);
                    a.pos += push;
                    b.pos -= push;
                }
            }
        }
    }

    /// First projectile to touch a hazard takes it out; both are consumed
    fn resolve_projectiles(&mut self, projectiles: &mut ProjectileStore, contacts: &mut Vec<Contact>) {
        // Back to front so removals never disturb unvisited entries
        for i in (0..self.hazards.len()).rev() {
            let bounds = self.hazards[i].bounds();
            let hit = projectiles
                .as_slice()
                .iter()
                .rposition(|p| bounds.overlaps_circle(p.pos, p.radius));

            if let Some(j) = hit {
                let hazard = self.hazards.remove(i);
                projectiles.remove(j);
                contacts.push(Contact::HazardDestroyed {
                    pos: hazard.center(),
                    cause: KillCause::Projectile,
                    points: HAZARD_POINTS,
                });
            }
        }
    }

    fn destroy_where(
        &mut self,
        cause: KillCause,
        contacts: &mut Vec<Contact>,
        mut doomed: impl FnMut(&Hazard) -> bool,
    ) {
        self.hazards.retain(|h| {
            if doomed(h) {
                contacts.push(Contact::HazardDestroyed {
                    pos: h.center(),
                    cause,
                    points: HAZARD_POINTS,
                });
                false
            } else {
                true
            }
        });
    }

    pub fn clear(&mut self) {
        self.hazards.clear();
    }

    pub fn as_slice(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}
