//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Stores own their
//! entities; the session fields (score, hits, timers) are only touched by the
//! tick procedure in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::{HazardStore, KillCause};
use super::input::TickInput;
use super::menu::Menu;
use super::pickup::PickupSet;
use super::player::{FormKind, Player};
use super::projectile::ProjectileStore;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, pause menu shown
    Paused,
    /// Run ended, waiting for restart or main menu
    GameOver,
}

/// Room sub-state, meaningful while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Room {
    /// Pickups and portal, no hazards
    #[default]
    Hub,
    /// Hazards spawn, score and hits count
    Combat,
}

/// Something the host may want to react to (sound, particles, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ShotFired { pos: Vec2 },
    DashStarted { pos: Vec2, direction: Vec2 },
    SpinStarted { pos: Vec2 },
    FormChanged { form: FormKind, pos: Vec2 },
    HazardSpawned { pos: Vec2 },
    HazardDestroyed { pos: Vec2, cause: KillCause, points: u64 },
    PlayerHit { pos: Vec2 },
    RoomEntered { room: Room },
    /// Stepped on the portal without a form
    PortalDenied,
    GameOver { score: u64 },
    RunStarted,
    Paused,
    Resumed,
    MenuOpened,
    MenuNavigated { cursor: usize },
    FullscreenRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub room: Room,
    pub menu: Menu,
    pub player: Player,
    pub pickups: PickupSet,
    pub projectiles: ProjectileStore,
    pub hazards: HazardStore,
    /// Never decreases within a combat session
    pub score: u64,
    pub hits: u32,
    pub max_hits: u32,
    /// Ticks since the last hazard spawn
    pub spawn_timer: u32,
    /// Hit-immunity window after taking damage
    pub invulnerability_ticks: u32,
    /// Shared across spin activations, counted down every playing tick
    pub spin_cooldown: u32,
    /// "Transform first" notice countdown
    pub notice_ticks: u32,
    /// Terminal flag; gameplay updates stop until restart
    pub game_over: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Input of the previous tick, for press edges
    pub prev_input: TickInput,
}

impl GameState {
    /// Create a new session on the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            room: Room::Hub,
            menu: Menu::default(),
            player: Player::new(),
            pickups: PickupSet::hub(),
            projectiles: ProjectileStore::new(),
            hazards: HazardStore::new(),
            score: 0,
            hits: 0,
            max_hits: MAX_HITS,
            spawn_timer: 0,
            invulnerability_ticks: 0,
            spin_cooldown: 0,
            notice_ticks: 0,
            game_over: false,
            time_ticks: 0,
            prev_input: TickInput::default(),
        }
    }

    /// Hazard spawning draws from here
    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Move to `phase`, resetting the menu cursor
    pub fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.menu.reset();
    }

    /// Fresh run in the hub: new player, hub pickups, empty stores
    pub fn start_run(&mut self) {
        self.room = Room::Hub;
        self.player = Player::new();
        self.pickups = PickupSet::hub();
        self.projectiles.clear();
        self.hazards.clear();
        self.score = 0;
        self.hits = 0;
        self.spawn_timer = 0;
        self.invulnerability_ticks = 0;
        self.spin_cooldown = 0;
        self.notice_ticks = 0;
        self.game_over = false;
        self.set_phase(GamePhase::Playing);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Leave the hub through the portal
    pub fn enter_combat(&mut self) {
        self.room = Room::Combat;
        self.player.pos = Vec2::new(HUB_EXIT_X, HUB_EXIT_Y);
        self.pickups.clear();
        self.hazards.clear();
        self.score = 0;
        self.hits = 0;
        self.spawn_timer = 0;
        self.spin_cooldown = 0;
        self.game_over = false;
        log::info!("Entered combat as {:?}", self.player.form.kind());
    }

    /// Count a hazard contact against the player
    ///
    /// Ignored during the post-hit immunity window. Returns true when this hit
    /// ended the run.
    pub fn on_player_hit(&mut self) -> bool {
        if self.invulnerability_ticks > 0 {
            return false;
        }
        self.hits += 1;
        self.invulnerability_ticks = INVULNERABILITY_TICKS;
        log::debug!("Player hit ({}/{})", self.hits, self.max_hits);

        if self.hits >= self.max_hits && !self.game_over {
            self.game_over = true;
            self.set_phase(GamePhase::GameOver);
            log::info!("Game over with score {}", self.score);
            return true;
        }
        false
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn hits_remaining(&self) -> u32 {
        self.max_hits.saturating_sub(self.hits)
    }
}
