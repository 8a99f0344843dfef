//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through explicit `dt` / `now_ms` arguments
//! - Seeded (or injected) RNG only
//! - Pillars kept in spawn order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tuning;

pub use clock::FrameClock;
pub use collision::{CollisionKind, Rect, check_collision};
pub use spawner::Spawner;
pub use state::{Bird, GameEvent, GamePhase, GameState, Pillar};
pub use tick::{primary_action, tick};
pub use tuning::Tuning;
