//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only, timers count ticks
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; effects leave as events

pub mod geometry;
pub mod hazard;
pub mod input;
pub mod menu;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use geometry::{Rect, distance, rect_circle_overlap, rects_overlap};
pub use hazard::{Contact, Hazard, HazardStore, KillCause, SpawnEdge};
pub use input::{Control, InputEdges, TickInput};
pub use menu::{Menu, MenuItem};
pub use pickup::{Pickup, PickupKind, PickupSet};
pub use player::{Form, FormKind, Player};
pub use projectile::{Projectile, ProjectileOrigin, ProjectileStore};
pub use snapshot::FrameSnapshot;
pub use state::{GameEvent, GamePhase, GameState, Room};
pub use tick::tick;
