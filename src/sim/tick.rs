//! Fixed timestep simulation tick
//!
//! One call advances the session by one step: menu and pause edges first,
//! then (while playing) player, pickups, projectiles, spawning and hazards in
//! that order.

use rand::Rng;

use super::hazard::{Contact, SpawnEdge};
use super::input::{Control, InputEdges, TickInput};
use super::menu::MenuItem;
use super::player::FormKind;
use super::state::{GameEvent, GamePhase, GameState, Room};
use crate::consts::*;

/// Advance the game state by one fixed timestep and return what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    let prev = state.prev_input;
    let edges = InputEdges::new(&prev, input);

    match state.phase {
        GamePhase::Playing => {
            if edges.any_pressed(&[Control::Cancel, Control::Pause]) {
                state.set_phase(GamePhase::Paused);
                log::info!("Paused");
                events.push(GameEvent::Paused);
            }
        }
        GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => {
            handle_menu(state, &edges, &mut events);
        }
    }

    if state.phase == GamePhase::Playing && !state.game_over {
        update_gameplay(state, input, &mut events);
    }

    state.prev_input = *input;
    events
}

/// Navigation and activation while a menu is up
fn handle_menu(state: &mut GameState, edges: &InputEdges, events: &mut Vec<GameEvent>) {
    let phase = state.phase;

    if edges.any_pressed(&[Control::NavUp, Control::MoveUp]) {
        state.menu.up();
        events.push(GameEvent::MenuNavigated {
            cursor: state.menu.cursor(),
        });
    } else if edges.any_pressed(&[Control::NavDown, Control::MoveDown]) {
        state.menu.down(phase);
        events.push(GameEvent::MenuNavigated {
            cursor: state.menu.cursor(),
        });
    } else if edges.any_pressed(&[Control::Select, Control::Confirm]) {
        if let Some(item) = state.menu.selected(phase) {
            activate(state, item, events);
        }
    } else if edges.pressed(Control::Cancel) {
        match phase {
            GamePhase::Paused => resume(state, events),
            GamePhase::GameOver => open_main_menu(state, events),
            GamePhase::Menu | GamePhase::Playing => {}
        }
    }
}

fn activate(state: &mut GameState, item: MenuItem, events: &mut Vec<GameEvent>) {
    match item {
        MenuItem::StartGame | MenuItem::Restart => {
            state.start_run();
            events.push(GameEvent::RunStarted);
        }
        MenuItem::ToggleFullscreen => events.push(GameEvent::FullscreenRequested),
        MenuItem::Resume => resume(state, events),
        MenuItem::MainMenu => open_main_menu(state, events),
    }
}

fn resume(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.set_phase(GamePhase::Playing);
    log::info!("Resumed");
    events.push(GameEvent::Resumed);
}

fn open_main_menu(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.set_phase(GamePhase::Menu);
    log::info!("Back to main menu");
    events.push(GameEvent::MenuOpened);
}

/// The gameplay update, run only while playing and not game over
fn update_gameplay(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.player.advance(
        input,
        &mut state.spin_cooldown,
        &mut state.projectiles,
        events,
    );

    if state.room == Room::Hub {
        state
            .pickups
            .check_collisions(&mut state.player, input.confirm, events);

        if state.pickups.portal_overlaps(&state.player.bounds()) {
            if state.player.form.kind() != FormKind::Base {
                state.enter_combat();
                events.push(GameEvent::RoomEntered { room: Room::Combat });
            } else {
                if state.notice_ticks == 0 {
                    events.push(GameEvent::PortalDenied);
                }
                state.notice_ticks = NOTICE_TICKS;
            }
        }
    }

    state.projectiles.advance();
    state.spin_cooldown = state.spin_cooldown.saturating_sub(1);

    if state.room == Room::Combat {
        state.spawn_timer += 1;
        if state.spawn_timer > SPAWN_INTERVAL_TICKS {
            spawn_hazard(state, events);
            state.spawn_timer = 0;
        }

        let contacts = state.hazards.advance(&state.player, &mut state.projectiles);
        for contact in contacts {
            apply_contact(state, contact, events);
        }

        state.invulnerability_ticks = state.invulnerability_ticks.saturating_sub(1);
    }

    state.notice_ticks = state.notice_ticks.saturating_sub(1);
}

/// One hazard just outside a random arena edge
fn spawn_hazard(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let rng = state.rng_mut();
    let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
    let along: f32 = rng.random();
    let pos = edge.spawn_point(along);

    state.hazards.spawn(pos, HAZARD_SPEED);
    log::debug!("Hazard spawned on {:?} edge at {}", edge, pos);
    events.push(GameEvent::HazardSpawned { pos });
}

fn apply_contact(state: &mut GameState, contact: Contact, events: &mut Vec<GameEvent>) {
    match contact {
        Contact::HazardDestroyed { pos, cause, points } => {
            state.score += points;
            events.push(GameEvent::HazardDestroyed { pos, cause, points });
        }
        Contact::PlayerHit { pos } => {
            if state.invulnerability_ticks > 0 {
                return;
            }
            events.push(GameEvent::PlayerHit { pos });
            if state.on_player_hit() {
                events.push(GameEvent::GameOver { score: state.score });
            }
        }
    }
}
