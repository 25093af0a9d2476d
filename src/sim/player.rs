//! Player avatar and its form state machine
//!
//! The avatar is always in exactly one [`Form`]. Each form carries its own
//! timers and latches, so switching forms drops the old form's state instead
//! of leaving stale counters behind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp_to_arena};
use super::input::TickInput;
use super::pickup::PickupKind;
use super::projectile::ProjectileStore;
use super::state::GameEvent;
use crate::consts::*;
use crate::{angle_toward, arena_center, direction_from_angle};

/// Dash direction when the aim point sits exactly on the avatar center
const DEFAULT_DASH_DIRECTION: Vec2 = Vec2::NEG_Y;

/// Form identity without per-form state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Base,
    Dash,
    Ranged,
    Spin,
}

impl FormKind {
    /// Form granted by a pickup (the portal grants none)
    pub fn from_pickup(kind: PickupKind) -> Option<Self> {
        match kind {
            PickupKind::Circle => Some(FormKind::Dash),
            PickupKind::Triangle => Some(FormKind::Ranged),
            PickupKind::Star => Some(FormKind::Spin),
            PickupKind::Portal => None,
        }
    }
}

/// Current form with its ability state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Form {
    /// Square: movement only
    Base,
    /// Circle: short invulnerable dash toward the aim point
    Dash {
        /// Ticks until another dash may start
        cooldown: u32,
        /// Ticks of dash movement left
        remaining: u32,
        /// Unit direction of the current dash
        direction: Vec2,
        /// Re-armed once the trigger is released
        armed: bool,
    },
    /// Triangle: aims at the pointer and fires one projectile per press
    Ranged {
        /// Radians, atan2 convention
        facing: f32,
        /// Re-armed once the trigger is released
        can_shoot: bool,
    },
    /// Star: brief spin that destroys nearby hazards
    Spin {
        remaining: u32,
        spinning: bool,
        /// Re-armed once the trigger is released
        ready: bool,
    },
}

impl Form {
    /// A form in its idle state
    pub fn fresh(kind: FormKind) -> Self {
        match kind {
            FormKind::Base => Form::Base,
            FormKind::Dash => Form::Dash {
                cooldown: 0,
                remaining: 0,
                direction: DEFAULT_DASH_DIRECTION,
                armed: false,
            },
            FormKind::Ranged => Form::Ranged {
                facing: 0.0,
                can_shoot: true,
            },
            FormKind::Spin => Form::Spin {
                remaining: 0,
                spinning: false,
                ready: false,
            },
        }
    }

    pub fn kind(&self) -> FormKind {
        match self {
            Form::Base => FormKind::Base,
            Form::Dash { .. } => FormKind::Dash,
            Form::Ranged { .. } => FormKind::Ranged,
            Form::Spin { .. } => FormKind::Spin,
        }
    }

    /// Count down per-form timers by one tick
    fn tick_timers(&mut self) {
        match self {
            Form::Dash {
                cooldown,
                remaining,
                ..
            } => {
                *cooldown = cooldown.saturating_sub(1);
                *remaining = remaining.saturating_sub(1);
            }
            Form::Spin {
                remaining,
                spinning,
                ..
            } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    *spinning = false;
                }
            }
            Form::Base | Form::Ranged { .. } => {}
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub size: f32,
    /// Units per tick
    pub speed: f32,
    pub form: Form,
    /// Last known aim point in world coordinates
    pub aim: Vec2,
    /// Pickup already applied while the confirm key stays held over it
    pub confirming: Option<PickupKind>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Base-form player in the middle of the arena
    pub fn new() -> Self {
        Self {
            pos: arena_center(),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            form: Form::Base,
            aim: arena_center(),
            confirming: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Switch to a fresh instance of `kind`, discarding the old form's state
    pub fn set_form(&mut self, kind: FormKind) {
        self.form = Form::fresh(kind);
    }

    /// Dash movement in progress
    pub fn is_dashing(&self) -> bool {
        matches!(self.form, Form::Dash { remaining, .. } if remaining > 0)
    }

    /// Spin attack in progress
    pub fn spin_attack_active(&self) -> bool {
        matches!(self.form, Form::Spin { spinning: true, remaining, .. } if remaining > 0)
    }

    /// Immune to hazard contact because of the current ability
    pub fn is_form_invulnerable(&self) -> bool {
        self.spin_attack_active() || self.is_dashing()
    }

    /// Advance the avatar by one tick
    ///
    /// `spin_cooldown` is the session-wide spin cooldown; it is reset here when
    /// a spin starts and counted down by the session.
    pub fn advance(
        &mut self,
        input: &TickInput,
        spin_cooldown: &mut u32,
        projectiles: &mut ProjectileStore,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(aim) = input.aim() {
            self.aim = aim;
        }
        self.form.tick_timers();

        let center = self.center();
        let walk = input.movement_axes() * self.speed;
        let trigger = input.fire;

        let step = match &mut self.form {
            Form::Dash {
                cooldown,
                remaining,
                direction,
                armed,
            } => {
                if !trigger {
                    *armed = true;
                }
                if trigger && *armed && *cooldown == 0 && *remaining == 0 {
                    *remaining = DASH_DURATION_TICKS;
                    *cooldown = DASH_COOLDOWN_TICKS;
                    *armed = false;
                    *direction = (self.aim - center)
                        .try_normalize()
                        .unwrap_or(DEFAULT_DASH_DIRECTION);
                    events.push(GameEvent::DashStarted {
                        pos: center,
                        direction: *direction,
                    });
                }
                // A press that could not dash is spent
                if trigger {
                    *armed = false;
                }
                if *remaining > 0 {
                    *direction * DASH_SPEED
                } else {
                    walk
                }
            }
            Form::Spin {
                remaining,
                spinning,
                ready,
            } => {
                if !trigger {
                    *ready = true;
                }
                if trigger && !*spinning && *ready && *spin_cooldown == 0 {
                    *remaining = SPIN_DURATION_TICKS;
                    *spinning = true;
                    *ready = false;
                    *spin_cooldown = SPIN_COOLDOWN_TICKS;
                    events.push(GameEvent::SpinStarted { pos: center });
                }
                if trigger {
                    *ready = false;
                }
                walk
            }
            Form::Ranged { .. } | Form::Base => walk,
        };

        self.pos = clamp_to_arena(self.pos + step, self.size);

        let center = self.center();
        let half_size = self.size / 2.0;
        if let Form::Ranged { facing, can_shoot } = &mut self.form {
            *facing = angle_toward(center, self.aim);
            if !trigger {
                *can_shoot = true;
            }
            if trigger && *can_shoot {
                let dir = direction_from_angle(*facing);
                let tip = center + dir * half_size;
                projectiles.spawn(tip, dir * PROJECTILE_SPEED);
                *can_shoot = false;
                events.push(GameEvent::ShotFired { pos: tip });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(player: &mut Player, input: &TickInput, spin_cooldown: &mut u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut projectiles = ProjectileStore::new();
        player.advance(input, spin_cooldown, &mut projectiles, &mut events);
        events
    }

    fn fire_at(target: Vec2) -> TickInput {
        TickInput {
            fire: true,
            pointer: Some(target),
            ..Default::default()
        }
    }

    #[test]
    fn test_move_right_ten_ticks() {
        let mut player = Player::new();
        player.pos = Vec2::new(640.0, 360.0);
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        let mut cd = 0;
        for _ in 0..10 {
            step(&mut player, &input, &mut cd);
        }
        assert_eq!(player.pos, Vec2::new(690.0, 360.0));
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut player = Player::new();
        player.pos = Vec2::new(100.0, 100.0);
        let input = TickInput {
            move_down: true,
            move_right: true,
            ..Default::default()
        };
        step(&mut player, &input, &mut 0);
        assert_eq!(player.pos, Vec2::new(105.0, 105.0));
    }

    #[test]
    fn test_clamped_at_arena_edges() {
        let mut player = Player::new();
        player.pos = Vec2::new(2.0, ARENA_HEIGHT - PLAYER_SIZE - 1.0);
        let input = TickInput {
            move_left: true,
            move_down: true,
            ..Default::default()
        };
        step(&mut player, &input, &mut 0);
        assert_eq!(player.pos, Vec2::new(0.0, ARENA_HEIGHT - PLAYER_SIZE));
    }

    #[test]
    fn test_dash_moves_for_fixed_duration() {
        let mut player = Player::new();
        player.pos = Vec2::new(300.0, 300.0);
        player.set_form(FormKind::Dash);
        let mut cd = 0;

        // Arm with a released trigger, then press toward +X
        step(&mut player, &TickInput::default(), &mut cd);
        let target = player.center() + Vec2::new(500.0, 0.0);
        let events = step(&mut player, &fire_at(target), &mut cd);
        assert!(matches!(events[..], [GameEvent::DashStarted { .. }]));
        assert!(player.is_dashing());

        // Trigger released; dash keeps going for the rest of its duration
        for _ in 1..DASH_DURATION_TICKS {
            step(&mut player, &TickInput::default(), &mut cd);
        }
        assert!((player.pos.x - (300.0 + DASH_SPEED * DASH_DURATION_TICKS as f32)).abs() < 1e-3);
        assert!(matches!(player.form, Form::Dash { remaining: 1, .. }));

        step(&mut player, &TickInput::default(), &mut cd);
        assert!(!player.is_dashing());
    }

    #[test]
    fn test_dash_requires_fresh_press_after_cooldown() {
        let mut player = Player::new();
        player.pos = Vec2::new(300.0, 300.0);
        player.set_form(FormKind::Dash);
        let mut cd = 0;
        let fire = fire_at(Vec2::new(1200.0, 320.0));

        step(&mut player, &TickInput::default(), &mut cd);
        let mut dashes = 0;
        // Holding the trigger well past the cooldown
        for _ in 0..(DASH_COOLDOWN_TICKS * 2) {
            dashes += step(&mut player, &fire, &mut cd)
                .iter()
                .filter(|e| matches!(e, GameEvent::DashStarted { .. }))
                .count();
        }
        assert_eq!(dashes, 1);

        // Release and press again
        step(&mut player, &TickInput::default(), &mut cd);
        let events = step(&mut player, &fire, &mut cd);
        assert!(matches!(events[..], [GameEvent::DashStarted { .. }]));
    }

    #[test]
    fn test_dash_press_during_cooldown_does_not_fire_on_expiry() {
        let mut player = Player::new();
        player.pos = Vec2::new(300.0, 300.0);
        player.set_form(FormKind::Dash);
        let mut cd = 0;
        let fire = fire_at(Vec2::new(1200.0, 320.0));

        step(&mut player, &TickInput::default(), &mut cd);
        let first = step(&mut player, &fire, &mut cd);
        assert!(matches!(first[..], [GameEvent::DashStarted { .. }]));

        // Release, then press once mid-cooldown and keep holding past expiry
        step(&mut player, &TickInput::default(), &mut cd);
        let mut dashes = 0;
        for _ in 0..(DASH_COOLDOWN_TICKS * 2) {
            dashes += step(&mut player, &fire, &mut cd)
                .iter()
                .filter(|e| matches!(e, GameEvent::DashStarted { .. }))
                .count();
        }
        assert_eq!(dashes, 0);

        step(&mut player, &TickInput::default(), &mut cd);
        let events = step(&mut player, &fire, &mut cd);
        assert!(matches!(events[..], [GameEvent::DashStarted { .. }]));
    }

    #[test]
    fn test_dash_aim_on_center_uses_default_direction() {
        let mut player = Player::new();
        player.pos = Vec2::new(300.0, 300.0);
        player.set_form(FormKind::Dash);
        let mut cd = 0;
        step(&mut player, &TickInput::default(), &mut cd);

        let center = player.center();
        step(&mut player, &fire_at(center), &mut cd);

        assert!(player.pos.is_finite());
        assert_eq!(player.pos, Vec2::new(300.0, 300.0 - DASH_SPEED));
        assert!(matches!(player.form, Form::Dash { direction, .. } if direction == Vec2::NEG_Y));
    }

    #[test]
    fn test_spin_needs_release_and_cooldown() {
        let mut player = Player::new();
        player.set_form(FormKind::Spin);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut cd = 0;

        // Held from the moment of switching: not ready yet
        let events = step(&mut player, &fire, &mut cd);
        assert!(events.is_empty());
        assert!(!player.spin_attack_active());

        step(&mut player, &TickInput::default(), &mut cd);
        let events = step(&mut player, &fire, &mut cd);
        assert!(matches!(events[..], [GameEvent::SpinStarted { .. }]));
        assert!(player.spin_attack_active());
        assert_eq!(cd, SPIN_COOLDOWN_TICKS);

        // Spin lasts its full duration, then stops
        for _ in 1..SPIN_DURATION_TICKS {
            step(&mut player, &TickInput::default(), &mut cd);
            assert!(player.spin_attack_active());
        }
        step(&mut player, &TickInput::default(), &mut cd);
        assert!(!player.spin_attack_active());

        // Shared cooldown still running (the session never decremented it here)
        let events = step(&mut player, &fire, &mut cd);
        assert!(events.is_empty());

        cd = 0;
        step(&mut player, &TickInput::default(), &mut cd);
        let events = step(&mut player, &fire, &mut cd);
        assert!(matches!(events[..], [GameEvent::SpinStarted { .. }]));
    }

    #[test]
    fn test_spin_held_through_cooldown_does_not_fire() {
        let mut player = Player::new();
        player.set_form(FormKind::Spin);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut cd = SPIN_COOLDOWN_TICKS;

        // Fresh press while the shared cooldown runs, then keep holding
        step(&mut player, &TickInput::default(), &mut cd);
        assert!(step(&mut player, &fire, &mut cd).is_empty());
        cd = 0;
        for _ in 0..10 {
            assert!(step(&mut player, &fire, &mut cd).is_empty());
        }

        step(&mut player, &TickInput::default(), &mut cd);
        let events = step(&mut player, &fire, &mut cd);
        assert!(matches!(events[..], [GameEvent::SpinStarted { .. }]));
    }

    #[test]
    fn test_spin_still_walks() {
        let mut player = Player::new();
        player.pos = Vec2::new(400.0, 400.0);
        player.set_form(FormKind::Spin);
        let input = TickInput {
            move_up: true,
            ..Default::default()
        };
        step(&mut player, &input, &mut 0);
        assert_eq!(player.pos, Vec2::new(400.0, 395.0));
    }

    #[test]
    fn test_ranged_fires_once_per_press() {
        let mut player = Player::new();
        player.pos = Vec2::new(100.0, 100.0);
        player.set_form(FormKind::Ranged);
        let mut projectiles = ProjectileStore::new();
        let mut events = Vec::new();
        let fire = fire_at(Vec2::new(600.0, 120.0));

        for _ in 0..5 {
            player.advance(&fire, &mut 0, &mut projectiles, &mut events);
        }
        assert_eq!(projectiles.len(), 1);

        player.advance(&TickInput::default(), &mut 0, &mut projectiles, &mut events);
        player.advance(&fire, &mut 0, &mut projectiles, &mut events);
        assert_eq!(projectiles.len(), 2);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_ranged_projectile_path() {
        let mut player = Player::new();
        player.pos = Vec2::new(100.0, 100.0);
        player.set_form(FormKind::Ranged);
        let mut projectiles = ProjectileStore::new();
        let mut events = Vec::new();

        // Aim straight right from the center (120, 120): facing angle 0
        player.advance(
            &fire_at(Vec2::new(800.0, 120.0)),
            &mut 0,
            &mut projectiles,
            &mut events,
        );
        assert!(matches!(player.form, Form::Ranged { facing, .. } if facing.abs() < 1e-6));

        // Spawned at the tip, half a size ahead of the center
        assert_eq!(projectiles.as_slice()[0].pos, Vec2::new(140.0, 120.0));
        for _ in 0..10 {
            projectiles.advance();
        }
        let p = projectiles.as_slice()[0].pos;
        assert!((p.x - (140.0 + PROJECTILE_SPEED * 10.0)).abs() < 1e-3);
        assert!((p.y - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_facing_tracks_pointer_every_tick() {
        let mut player = Player::new();
        player.pos = Vec2::new(100.0, 100.0);
        player.set_form(FormKind::Ranged);
        let input = TickInput {
            pointer: Some(Vec2::new(120.0, 500.0)),
            ..Default::default()
        };
        step(&mut player, &input, &mut 0);
        assert!(
            matches!(player.form, Form::Ranged { facing, .. } if (facing - std::f32::consts::FRAC_PI_2).abs() < 1e-5)
        );
    }

    #[test]
    fn test_switching_form_drops_timers() {
        let mut player = Player::new();
        player.set_form(FormKind::Dash);
        player.form = Form::Dash {
            cooldown: 25,
            remaining: 4,
            direction: Vec2::X,
            armed: false,
        };
        player.set_form(FormKind::Spin);
        assert!(!player.is_dashing());
        assert!(!player.is_form_invulnerable());

        player.set_form(FormKind::Dash);
        assert!(matches!(
            player.form,
            Form::Dash {
                cooldown: 0,
                remaining: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_pickup_form_mapping() {
        assert_eq!(FormKind::from_pickup(PickupKind::Circle), Some(FormKind::Dash));
        assert_eq!(FormKind::from_pickup(PickupKind::Triangle), Some(FormKind::Ranged));
        assert_eq!(FormKind::from_pickup(PickupKind::Star), Some(FormKind::Spin));
        assert_eq!(FormKind::from_pickup(PickupKind::Portal), None);
    }
}
