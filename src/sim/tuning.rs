//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here, so a round can be
//! replayed with different physics without touching code. Missing JSON fields
//! fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ground_height: f32,

    // === Bird ===
    pub bird_x: f32,
    pub bird_start_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub max_fall_speed: f32,

    // === Pillars ===
    pub pillar_speed: f32,
    pub pillar_width: f32,
    pub pillar_gap: f32,
    pub pillar_min_height: f32,
    pub pillar_height_range: f32,
    pub spawn_interval_ms: f64,

    /// Upper bound on a single frame's dt (seconds). `None` keeps raw deltas.
    pub max_frame_dt: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_fall_speed: MAX_FALL_SPEED,

            pillar_speed: PILLAR_SPEED,
            pillar_width: PILLAR_WIDTH,
            pillar_gap: PILLAR_GAP,
            pillar_min_height: PILLAR_MIN_HEIGHT,
            pillar_height_range: PILLAR_HEIGHT_RANGE,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            max_frame_dt: None,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (unspecified fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), String> {
        fn positive(name: &str, v: f32) -> Result<(), String> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be a positive number, got {}", name, v))
            }
        }
        fn non_negative(name: &str, v: f32) -> Result<(), String> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(format!("{} must be zero or more, got {}", name, v))
            }
        }

        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        non_negative("ground_height", self.ground_height)?;
        if self.ground_height >= self.viewport_height {
            return Err("ground_height must be below viewport_height".into());
        }
        positive("bird_width", self.bird_width)?;
        positive("bird_height", self.bird_height)?;
        if !self.bird_x.is_finite() || !self.bird_start_y.is_finite() {
            return Err("bird position must be finite".into());
        }
        if !self.gravity.is_finite() || !self.jump_impulse.is_finite() {
            return Err("gravity and jump_impulse must be finite".into());
        }
        non_negative("max_fall_speed", self.max_fall_speed)?;
        non_negative("pillar_speed", self.pillar_speed)?;
        positive("pillar_width", self.pillar_width)?;
        positive("pillar_gap", self.pillar_gap)?;
        non_negative("pillar_min_height", self.pillar_min_height)?;
        non_negative("pillar_height_range", self.pillar_height_range)?;
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms >= 0.0) {
            return Err(format!(
                "spawn_interval_ms must be zero or more, got {}",
                self.spawn_interval_ms
            ));
        }
        if let Some(max_dt) = self.max_frame_dt {
            positive("max_frame_dt", max_dt)?;
        }
        Ok(())
    }

    /// Y coordinate of the top of the ground strip
    pub fn floor_y(&self) -> f32 {
        self.viewport_height - self.ground_height
    }
}
