//! Read-only frame view for render hosts
//!
//! Borrows from the state; building one never modifies the simulation.

use serde::Serialize;

use super::hazard::Hazard;
use super::menu::items_for;
use super::pickup::Pickup;
use super::player::Player;
use super::projectile::Projectile;
use super::state::{GameEvent, GamePhase, GameState, Room};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Serialize)]
pub struct FrameSnapshot<'a> {
    pub tick: u64,
    pub phase: GamePhase,
    pub room: Room,
    pub menu_items: Vec<&'static str>,
    pub menu_cursor: usize,
    pub player: &'a Player,
    pub hazards: &'a [Hazard],
    pub projectiles: &'a [Projectile],
    pub pickups: &'a [Pickup],
    pub score: u64,
    pub hits: u32,
    pub max_hits: u32,
    /// Post-hit immunity running (renderers blink the player)
    pub invulnerable: bool,
    /// Show the "transform first" notice
    pub notice: bool,
    /// Events since the previous snapshot
    pub events: &'a [GameEvent],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(state: &'a GameState, events: &'a [GameEvent]) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            room: state.room,
            menu_items: items_for(state.phase).iter().map(|i| i.label()).collect(),
            menu_cursor: state.menu.cursor(),
            player: &state.player,
            hazards: state.hazards.as_slice(),
            projectiles: state.projectiles.as_slice(),
            pickups: state.pickups.as_slice(),
            score: state.score,
            hits: state.hits,
            max_hits: state.max_hits,
            invulnerable: state.invulnerability_ticks > 0,
            notice: state.notice_ticks > 0,
            events,
            fps: None,
        }
    }

    pub fn with_fps(mut self, fps: Option<u32>) -> Self {
        self.fps = fps;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use crate::sim::TickInput;

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = GameState::new(3);
        let events = tick(
            &mut state,
            &TickInput {
                select: true,
                ..Default::default()
            },
        );

        let json = FrameSnapshot::capture(&state, &events).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["room"], "Hub");
        assert_eq!(value["pickups"].as_array().unwrap().len(), 4);
        assert_eq!(value["player"]["form"]["kind"], "Base");
        assert_eq!(value["events"][0]["type"], "RunStarted");
        assert!(value.get("fps").is_none());
    }

    #[test]
    fn test_menu_items_follow_phase() {
        let state = GameState::new(3);
        let snapshot = FrameSnapshot::capture(&state, &[]).with_fps(Some(60));
        assert_eq!(snapshot.menu_items, vec!["Start Game", "Toggle Fullscreen"]);
        assert_eq!(snapshot.fps, Some(60));
    }
}
