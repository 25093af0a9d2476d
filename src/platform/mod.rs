//! Platform abstraction layer
//!
//! Seams between the simulation and the outside world:
//! - `input`: raw key/pointer events folded into a polled `TickInput`
//! - `EventSink`: where per-tick `GameEvent`s go (audio, effects, logs)

pub mod input;

pub use input::{KeyMap, Viewport};

use crate::sim::GameEvent;

/// Receives simulation events, fire-and-forget
///
/// Implementations must not fail the frame; anything that can go wrong
/// (audio backend missing, ...) is handled inside the sink.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Logs session-level events at info, the rest at debug
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoomEntered { .. }
            | GameEvent::GameOver { .. }
            | GameEvent::RunStarted
            | GameEvent::FullscreenRequested => log::info!("{:?}", event),
            _ => log::debug!("{:?}", event),
        }
    }
}

/// Collects events, e.g. for the next frame snapshot
impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

/// Both sinks, in order
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_event(&mut self, event: &GameEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_forwards_to_both() {
        let mut a: Vec<GameEvent> = Vec::new();
        let mut b: Vec<GameEvent> = Vec::new();
        {
            let mut pair = (&mut a, &mut b);
            pair.on_event(&GameEvent::Paused);
            pair.on_event(&GameEvent::Resumed);
        }
        assert_eq!(a, vec![GameEvent::Paused, GameEvent::Resumed]);
        assert_eq!(a, b);
    }
}
