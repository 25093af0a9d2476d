//! Shape Dodge entry point
//!
//! The browser build starts from `shape_dodge::web`. Natively there is no
//! window: this runs a short scripted session headless and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Shape Dodge (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is shape_dodge::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use shape_dodge::GameLoop;
    use shape_dodge::consts::*;
    use shape_dodge::persistence::default_store;
    use shape_dodge::platform::{EventSink, KeyMap, LogSink};
    use shape_dodge::sim::{GameEvent, GamePhase, Room};

    /// Counts what happened on top of logging it
    #[derive(Default)]
    struct Tally {
        log: LogSink,
        shots: u32,
        kills: u32,
        hits: u32,
    }

    impl EventSink for Tally {
        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::ShotFired { .. } => self.shots += 1,
                GameEvent::HazardDestroyed { .. } => self.kills += 1,
                GameEvent::PlayerHit { .. } => self.hits += 1,
                _ => {}
            }
            self.log.on_event(event);
        }
    }

    /// Script: start, take the triangle, walk into the portal, then circle
    /// the arena shooting at the nearest hazard until the run ends
    pub fn run(seed: u64) {
        let mut game = GameLoop::new(seed, default_store());
        let mut keys = KeyMap::new();
        let mut tally = Tally::default();

        step(&mut game, &mut keys, &mut tally, &["Enter"], 2);

        let triangle = Vec2::new(PICKUP_START_X + PICKUP_SPACING, PICKUP_ROW_Y);
        walk_to(&mut game, &mut keys, &mut tally, triangle);
        step(&mut game, &mut keys, &mut tally, &[" "], 2);

        walk_to(&mut game, &mut keys, &mut tally, Vec2::new(PORTAL_X, PORTAL_Y));
        if game.state().room != Room::Combat {
            log::warn!("Demo never reached the combat room");
            return;
        }

        // Ten simulated minutes at most
        for frame in 0..(TICK_RATE * 600) {
            if game.state().phase != GamePhase::Playing {
                break;
            }
            let target = game
                .state()
                .hazards
                .iter()
                .map(|h| h.center())
                .min_by(|a, b| {
                    let pc = game.state().player.center();
                    a.distance(pc).total_cmp(&b.distance(pc))
                });
            if let Some(target) = target {
                keys.pointer_moved(target);
            }
            // Tap the trigger every ten ticks
            if frame % 10 < 5 {
                keys.pointer_down();
            } else {
                keys.pointer_up();
            }
            let dir = match (frame / 60) % 4 {
                0 => "w",
                1 => "d",
                2 => "s",
                _ => "a",
            };
            step(&mut game, &mut keys, &mut tally, &[dir], 1);
        }

        let state = game.state();
        log::info!(
            "Demo finished: phase {:?}, score {}, {} shots, {} kills, {} hits, {} ticks",
            state.phase,
            state.score,
            tally.shots,
            tally.kills,
            tally.hits,
            state.time_ticks
        );
    }

    /// Hold `held` for `ticks` ticks, then release them
    fn step(game: &mut GameLoop, keys: &mut KeyMap, sink: &mut Tally, held: &[&str], ticks: u32) {
        for key in held {
            keys.key_down(key);
        }
        for _ in 0..ticks {
            game.frame(SIM_DT, &keys.snapshot(), sink);
        }
        for key in held {
            keys.key_up(key);
        }
    }

    /// Walk the player's top-left corner onto `target` using WASD only
    fn walk_to(game: &mut GameLoop, keys: &mut KeyMap, sink: &mut Tally, target: Vec2) {
        for _ in 0..(TICK_RATE * 10) {
            let delta = target - game.state().player.pos;
            if delta.abs().max_element() < PLAYER_SPEED || game.state().room == Room::Combat {
                return;
            }
            let mut held = Vec::new();
            if delta.x > PLAYER_SPEED / 2.0 {
                held.push("d");
            } else if delta.x < -PLAYER_SPEED / 2.0 {
                held.push("a");
            }
            if delta.y > PLAYER_SPEED / 2.0 {
                held.push("s");
            } else if delta.y < -PLAYER_SPEED / 2.0 {
                held.push("w");
            }
            step(game, keys, sink, &held, 1);
        }
    }
}
