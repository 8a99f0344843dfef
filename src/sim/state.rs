//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]; the frame driver and
//! the input handlers only ever touch it through the functions in `tick`.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionKind, Rect};
use super::spawner::Spawner;
use super::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap
    Idle,
    /// Active gameplay
    Playing,
    /// Bird crashed, waiting for restart input
    Ended,
}

/// Side effects produced by the simulation, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Bird received an upward impulse
    Jumped,
    /// A pillar was passed; carries the new score
    Scored { score: u32 },
    /// Bird collided with a pillar or the viewport bounds
    Hit(CollisionKind),
    /// Best score was beaten and must be persisted
    NewBest { score: u32 },
    /// Round state was cleared (Ended -> Idle)
    RoundReset,
}

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner (x never changes)
    pub pos: Vec2,
    /// Vertical velocity, positive is down
    pub vel: f32,
    pub size: Vec2,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.bird_start_y),
            vel: 0.0,
            size: Vec2::new(tuning.bird_width, tuning.bird_height),
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
        }
    }

    /// Axis-aligned bounds for collision checks
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Replace the current velocity with the jump impulse
    pub fn flap(&mut self) {
        self.vel = self.jump_impulse;
    }

    /// Semi-implicit Euler step with terminal velocity
    pub fn integrate(&mut self, dt: f32, max_fall_speed: f32) {
        self.vel += self.gravity * dt;
        if self.vel > max_fall_speed {
            self.vel = max_fall_speed;
        }
        self.pos.y += self.vel * dt;
    }

    /// Put the bird back at its spawn height, at rest
    pub fn reset(&mut self, start_y: f32) {
        self.pos.y = start_y;
        self.vel = 0.0;
    }
}

/// A pillar pair with a gap the bird has to fly through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (gap starts here)
    pub height: f32,
    /// Vertical size of the gap
    pub gap: f32,
    /// Already counted towards the score
    pub passed: bool,
}

impl Pillar {
    pub fn new(x: f32, height: f32, gap: f32) -> Self {
        Self {
            x,
            height,
            gap,
            passed: false,
        }
    }

    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    /// Y where the bottom segment begins
    pub fn gap_bottom(&self) -> f32 {
        self.height + self.gap
    }
}

/// Complete game state (the single owner of everything a round mutates)
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    /// Seed the RNG was created from (0 for injected sources)
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Live pillars in spawn order
    pub pillars: Vec<Pillar>,
    pub score: u32,
    pub best_score: u32,
    pub spawner: Spawner,
    /// Accumulated simulated seconds in the current round
    pub round_time: f64,
    /// Rounds completed since startup
    pub rounds: u32,
    /// Pending side effects
    pub events: Vec<GameEvent>,
    rng: R,
}

impl GameState<Pcg32> {
    /// Create a new game state with a seeded PCG source
    pub fn new(seed: u64, tuning: Tuning, best_score: u32) -> Self {
        let mut state = Self::with_rng(Pcg32::seed_from_u64(seed), tuning, best_score);
        state.seed = seed;
        state
    }
}

impl<R: RngCore> GameState<R> {
    /// Create a game state driven by an arbitrary random source
    pub fn with_rng(rng: R, tuning: Tuning, best_score: u32) -> Self {
        Self {
            seed: 0,
            bird: Bird::new(&tuning),
            tuning,
            phase: GamePhase::Idle,
            pillars: Vec::new(),
            score: 0,
            best_score,
            spawner: Spawner::default(),
            round_time: 0.0,
            rounds: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Append a new pillar if the spawn interval has elapsed at `now_ms`
    pub fn spawn_due(&mut self, now_ms: f64) {
        if let Some(pillar) = self.spawner.poll(now_ms, &self.tuning, &mut self.rng) {
            self.pillars.push(pillar);
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record the score as the best if it beats the previous one
    fn promote_best(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.push(GameEvent::NewBest { score: self.score });
            log::info!("New best score: {}", self.score);
        }
    }

    /// Playing -> Ended. Ignored in any other phase.
    pub fn end_round(&mut self, cause: CollisionKind) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Ended;
        self.events.push(GameEvent::Hit(cause));
        self.promote_best();
        log::info!(
            "Round over ({:?}) score={} best={} after {:.1}s",
            cause,
            self.score,
            self.best_score,
            self.round_time
        );
    }

    /// Clear the round and go back to Idle
    pub fn reset_round(&mut self) {
        // Points scored on the crash tick land after the best-score check
        self.promote_best();

        self.bird.reset(self.tuning.bird_start_y);
        self.pillars.clear();
        self.score = 0;
        self.spawner.reset();
        self.round_time = 0.0;
        self.rounds += 1;
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::RoundReset);
    }
}
