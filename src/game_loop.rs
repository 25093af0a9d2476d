//! Frame driver
//!
//! Turns variable frame times into fixed simulation ticks, forwards every
//! event to a sink, and owns the persisted settings.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::KeyValueStore;
use crate::platform::EventSink;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Game instance holding all state
pub struct GameLoop {
    state: GameState,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    accumulator: f32,
    // FPS tracking
    fps_frames: u32,
    fps_elapsed: f32,
    fps: u32,
}

impl GameLoop {
    /// New session on the title screen; settings come from `store`
    pub fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let settings = Settings::load_from(store.as_ref());
        Self {
            state: GameState::new(seed),
            settings,
            store,
            accumulator: 0.0,
            fps_frames: 0,
            fps_elapsed: 0.0,
            fps: 0,
        }
    }

    /// Advance by one rendered frame of `dt` seconds
    ///
    /// Runs as many fixed ticks as the accumulated time allows (at most
    /// `MAX_SUBSTEPS`) and returns how many ran.
    pub fn frame(&mut self, dt: f32, input: &TickInput, sink: &mut dyn EventSink) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            for event in tick(&mut self.state, input) {
                sink.on_event(&event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.track_fps(dt);
        substeps
    }

    fn track_fps(&mut self, dt: f32) {
        self.fps_frames += 1;
        self.fps_elapsed += dt;
        if self.fps_elapsed >= 1.0 {
            self.fps = (self.fps_frames as f32 / self.fps_elapsed).round() as u32;
            self.fps_frames = 0;
            self.fps_elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// FPS for the HUD: only while playing and enabled in settings
    pub fn hud_fps(&self) -> Option<u32> {
        (self.settings.show_fps && self.state.phase == GamePhase::Playing).then_some(self.fps)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
        self.save_settings();
    }

    /// Returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.save_settings();
        self.settings.sound_enabled
    }

    /// Returns the new state
    pub fn toggle_show_fps(&mut self) -> bool {
        self.settings.show_fps = !self.settings.show_fps;
        self.save_settings();
        self.settings.show_fps
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save_to(self.store.as_mut()) {
            log::warn!("Could not save settings: {}", e);
        }
    }
}
