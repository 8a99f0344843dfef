//! Time-gated pillar generation
//!
//! Spawning runs off the wall clock rather than accumulated simulation time,
//! so pillar spacing stays the same whatever the frame rate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Pillar;
use super::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Wall-clock time (ms) of the last spawn, 0 after a reset
    pub last_spawn_ms: f64,
}

impl Spawner {
    /// Spawn a pillar at the right edge if the interval has elapsed
    pub fn poll<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Pillar> {
        if now_ms - self.last_spawn_ms <= tuning.spawn_interval_ms {
            return None;
        }
        self.last_spawn_ms = now_ms;

        let height = random_pillar_height(rng, tuning);
        log::trace!("Spawned pillar at t={:.0}ms, height={:.1}", now_ms, height);
        Some(Pillar::new(tuning.viewport_width, height, tuning.pillar_gap))
    }

    /// Forget the last spawn so the next round spawns immediately
    pub fn reset(&mut self) {
        self.last_spawn_ms = 0.0;
    }
}

/// Top segment height, uniform in `[min, min + range)`
pub fn random_pillar_height<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f32 {
    let min = tuning.pillar_min_height;
    let max = min + tuning.pillar_height_range;
    // A range too small to register at f32 precision collapses to `min`
    if !(max > min) {
        return min;
    }
    rng.random_range(min..max)
}
