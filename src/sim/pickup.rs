//! Hub pickups: transformation shapes and the combat portal

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::player::{FormKind, Player};
use super::state::GameEvent;
use crate::consts::*;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Grants the dash form
    Circle,
    /// Grants the ranged form
    Triangle,
    /// Grants the spin form
    Star,
    /// Room transition trigger, never consumed
    Portal,
}

/// A pickup entity (square)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PickupKind,
}

impl Pickup {
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// Pickups present in the current room
#[derive(Debug, Clone, Default)]
pub struct PickupSet {
    pickups: Vec<Pickup>,
}

impl PickupSet {
    /// The hub layout: three form pickups in a row and the portal on the right
    pub fn hub() -> Self {
        let form_pickup = |i: usize, kind| Pickup {
            pos: Vec2::new(PICKUP_START_X + i as f32 * PICKUP_SPACING, PICKUP_ROW_Y),
            size: PICKUP_SIZE,
            kind,
        };
        Self {
            pickups: vec![
                form_pickup(0, PickupKind::Circle),
                form_pickup(1, PickupKind::Triangle),
                form_pickup(2, PickupKind::Star),
                Pickup {
                    pos: Vec2::new(PORTAL_X, PORTAL_Y),
                    size: PORTAL_SIZE,
                    kind: PickupKind::Portal,
                },
            ],
        }
    }

    /// Apply a transformation when the player confirms on a form pickup
    ///
    /// Only the first overlapping form pickup (scanning from the back) counts.
    /// Holding confirm on the same pickup changes nothing after the first tick;
    /// stepping onto a different one while still holding switches again.
    /// Leaving every form pickup clears the confirm latch.
    pub fn check_collisions(
        &self,
        player: &mut Player,
        confirm_held: bool,
        events: &mut Vec<GameEvent>,
    ) {
        let bounds = player.bounds();
        let hovered = self
            .pickups
            .iter()
            .rev()
            .filter(|p| p.kind != PickupKind::Portal)
            .find(|p| p.bounds().overlaps(&bounds));

        let Some(pickup) = hovered else {
            player.confirming = None;
            return;
        };

        if confirm_held && player.confirming != Some(pickup.kind) {
            if let Some(form) = FormKind::from_pickup(pickup.kind) {
                player.set_form(form);
                player.confirming = Some(pickup.kind);
                log::debug!("Player transformed into {:?}", form);
                events.push(GameEvent::FormChanged {
                    form,
                    pos: pickup.bounds().center(),
                });
            }
        }
    }

    /// Is the player standing on the portal?
    pub fn portal_overlaps(&self, bounds: &Rect) -> bool {
        self.pickups
            .iter()
            .any(|p| p.kind == PickupKind::Portal && p.bounds().overlaps(bounds))
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }

    pub fn as_slice(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}
