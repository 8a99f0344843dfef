//! Flappy Night - a night-sky side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game phases)
//! - `game`: Frame driver gluing the simulation to its collaborators
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Collaborator interfaces (audio, persistence, rendering)
//! - `persistence`: Best score storage
//! - `settings`: User preferences
//! - `audio`: Web Audio cue synthesis (WASM only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical viewport size (all simulation coordinates live in this space, y grows down)
    pub const VIEWPORT_WIDTH: f32 = 1200.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 60.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 120.0;
    pub const BIRD_START_Y: f32 = 300.0;
    pub const BIRD_WIDTH: f32 = 60.0;
    pub const BIRD_HEIGHT: f32 = 90.0;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 2200.0;
    /// Velocity set by a flap (negative = up)
    pub const JUMP_IMPULSE: f32 = -750.0;
    /// Terminal fall speed (units/s)
    pub const MAX_FALL_SPEED: f32 = 900.0;

    /// Pillar defaults
    pub const PILLAR_SPEED: f32 = 650.0;
    pub const PILLAR_WIDTH: f32 = 120.0;
    pub const PILLAR_GAP: f32 = 300.0;
    /// Top segment height is drawn from [MIN, MIN + RANGE)
    pub const PILLAR_MIN_HEIGHT: f32 = 120.0;
    pub const PILLAR_HEIGHT_RANGE: f32 = 350.0;

    /// Milliseconds between pillar spawns
    pub const SPAWN_INTERVAL_MS: f64 = 900.0;
}
