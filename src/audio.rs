//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Recipes are plain data so they can be inspected and tested on any target;
//! only the player (`AudioManager`) is wasm specific.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ranged form fired
    Shoot,
    /// Hazard destroyed by any means
    EnemyDestroy,
    /// Player took damage
    PlayerHit,
    /// Transformed on a pickup
    Pickup,
    Dash,
    Spin,
    /// Walked through the portal into combat
    PortalEnter,
    GameOver,
    /// New run started
    LevelStart,
    /// Menu cursor moved
    MenuMove,
}

/// Oscillator shapes used by the recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f64,
    pub wave: Waveform,
    /// Peak gain before the master volume is applied
    pub gain: f32,
    /// Seconds after the effect is triggered
    pub delay: f64,
}

const fn tone(freq: f32, duration: f64, wave: Waveform, gain: f32, delay: f64) -> Tone {
    Tone {
        freq,
        duration,
        wave,
        gain,
        delay,
    }
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::DashStarted { .. } => Some(SoundEffect::Dash),
            GameEvent::SpinStarted { .. } => Some(SoundEffect::Spin),
            GameEvent::FormChanged { .. } => Some(SoundEffect::Pickup),
            GameEvent::HazardDestroyed { .. } => Some(SoundEffect::EnemyDestroy),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::RoomEntered { .. } => Some(SoundEffect::PortalEnter),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::RunStarted => Some(SoundEffect::LevelStart),
            GameEvent::MenuNavigated { .. } => Some(SoundEffect::MenuMove),
            GameEvent::HazardSpawned { .. }
            | GameEvent::PortalDenied
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::MenuOpened
            | GameEvent::FullscreenRequested => None,
        }
    }

    /// The notes that make up this effect
    pub fn tones(self) -> Vec<Tone> {
        use Waveform::*;

        match self {
            SoundEffect::Shoot => vec![
                tone(800.0, 0.1, Square, 0.2, 0.0),
                tone(600.0, 0.05, Square, 0.15, 0.05),
            ],
            SoundEffect::EnemyDestroy => vec![
                tone(150.0, 0.3, Sawtooth, 0.4, 0.0),
                tone(100.0, 0.2, Triangle, 0.3, 0.1),
            ],
            SoundEffect::PlayerHit => vec![tone(220.0, 0.2, Triangle, 0.25, 0.0)],
            // C E G
            SoundEffect::Pickup => vec![
                tone(523.0, 0.1, Sine, 0.3, 0.0),
                tone(659.0, 0.1, Sine, 0.3, 0.08),
                tone(784.0, 0.15, Sine, 0.3, 0.16),
            ],
            SoundEffect::Dash => vec![
                tone(1000.0, 0.2, Sawtooth, 0.25, 0.0),
                tone(1200.0, 0.1, Square, 0.2, 0.1),
            ],
            SoundEffect::Spin => (0..5)
                .map(|i| tone(400.0 + i as f32 * 100.0, 0.05, Triangle, 0.2, i as f64 * 0.03))
                .collect(),
            SoundEffect::PortalEnter => (0..10)
                .map(|i| tone(200.0 + i as f32 * 50.0, 0.1, Sine, 0.3, i as f64 * 0.05))
                .collect(),
            SoundEffect::GameOver => [440.0, 392.0, 349.0, 330.0, 294.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| tone(f, 0.16, Triangle, 0.3, i as f64 * 0.14))
                .collect(),
            SoundEffect::LevelStart => [392.0, 523.0, 659.0, 784.0]
                .iter()
                .enumerate()
                .map(|(i, &f)| tone(f, 0.2, Sine, 0.3, i as f64 * 0.15))
                .collect(),
            SoundEffect::MenuMove => vec![tone(660.0, 0.05, Sine, 0.15, 0.0)],
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::platform::EventSink;
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        enabled: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.volume,
                enabled: settings.sound_enabled,
            }
        }

        /// Pick up volume/enable changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.volume;
            self.enabled = settings.sound_enabled;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if !self.enabled || self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers start contexts suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let now = ctx.current_time();
            for tone in effect.tones() {
                self.play_tone(ctx, &tone, now + tone.delay);
            }
        }

        /// Oscillator with a short attack and exponential release
        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, at: f64) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.wave {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            osc.frequency().set_value_at_time(tone.freq, at).ok()?;
            gain.gain().set_value_at_time(0.0, at).ok()?;
            gain.gain()
                .linear_ramp_to_value_at_time(tone.gain * self.volume, at + 0.01)
                .ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, at + tone.duration)
                .ok()?;

            osc.start_with_when(at).ok()?;
            osc.stop_with_when(at + tone.duration).ok()?;
            Some(())
        }
    }

    impl EventSink for AudioManager {
        fn on_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn test_event_mapping() {
        let shot = GameEvent::ShotFired { pos: Vec2::ZERO };
        assert_eq!(SoundEffect::for_event(&shot), Some(SoundEffect::Shoot));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::RunStarted),
            Some(SoundEffect::LevelStart)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::Paused), None);
    }

    #[test]
    fn test_recipes_are_scheduled_in_order() {
        let notes = SoundEffect::GameOver.tones();
        assert_eq!(notes.len(), 5);
        assert!(notes.windows(2).all(|w| w[0].delay < w[1].delay));
        assert!(notes.windows(2).all(|w| w[0].freq > w[1].freq));

        assert_eq!(SoundEffect::PortalEnter.tones().len(), 10);
        assert_eq!(SoundEffect::Spin.tones()[4].freq, 800.0);
    }
}
