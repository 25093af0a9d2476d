//! Browser entry points
//!
//! The page owns the canvas and draws from the JSON snapshot returned by
//! [`WebGame::frame`]; everything else (input folding, ticking, audio,
//! settings) happens here.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::consts::SIM_DT;
use crate::game_loop::GameLoop;
use crate::persistence::default_store;
use crate::platform::{KeyMap, Viewport};
use crate::sim::{FrameSnapshot, GameEvent};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Shape Dodge (web) starting...");
}

/// Game instance driven by `requestAnimationFrame` on the page
#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop,
    keys: KeyMap,
    viewport: Viewport,
    audio: AudioManager,
    last_time: f64,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let game = GameLoop::new(seed, default_store());
        let audio = AudioManager::new(game.settings());
        log::info!("Game created with seed: {}", seed);
        WebGame {
            game,
            keys: KeyMap::new(),
            viewport: Viewport::new(width, height),
            audio,
            last_time: 0.0,
            events: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn key_down(&mut self, key: &str) {
        // First gesture unlocks audio
        self.audio.resume();
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Canvas-relative pixel position
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(world) = self.viewport.to_world(glam::Vec2::new(x, y)) {
            self.keys.pointer_moved(world);
        }
    }

    pub fn pointer_down(&mut self, button: i16) {
        if button == 0 {
            self.audio.resume();
            self.keys.pointer_down();
        }
    }

    pub fn pointer_up(&mut self, button: i16) {
        if button == 0 {
            self.keys.pointer_up();
        }
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        self.keys.clear();
    }

    /// Run the simulation up to `time_ms` and return the frame as JSON
    pub fn frame(&mut self, time_ms: f64) -> String {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time_ms;

        self.events.clear();
        let input = self.keys.snapshot();
        let mut sink = (&mut self.audio, &mut self.events);
        self.game.frame(dt, &input, &mut sink);

        FrameSnapshot::capture(self.game.state(), &self.events)
            .with_fps(self.game.hud_fps())
            .to_json()
            .unwrap_or_else(|e| {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("{}")
            })
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.game.set_volume(volume);
        self.audio.apply_settings(self.game.settings());
    }

    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.game.toggle_sound();
        self.audio.apply_settings(self.game.settings());
        enabled
    }

    pub fn toggle_show_fps(&mut self) -> bool {
        self.game.toggle_show_fps()
    }

    pub fn volume(&self) -> f32 {
        self.game.settings().volume
    }
}
