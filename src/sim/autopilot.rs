//! Idle/demo mode - a tiny controller that flies the bird
//!
//! Aims for a line a little above the bottom of the next gap and flaps
//! whenever the bird is about to sink below it.

use super::state::{GamePhase, GameState, Pillar};

/// Clearance kept above the bottom segment of the targeted gap
const GAP_MARGIN: f32 = 30.0;
/// How far ahead (seconds) the bird's fall is extrapolated
const LOOKAHEAD_SECS: f32 = 0.08;
/// Never flap while the bird's top is this close to the ceiling
const CEILING_MARGIN: f32 = 40.0;

/// Next pillar the bird still has to clear
pub fn next_pillar<R>(state: &GameState<R>) -> Option<&Pillar> {
    let bird_left = state.bird.pos.x;
    let width = state.tuning.pillar_width;
    state
        .pillars
        .iter()
        .find(|p| p.right_edge(width) >= bird_left)
}

/// Whether a flap should be issued this frame
pub fn wants_flap<R>(state: &GameState<R>) -> bool {
    match state.phase {
        GamePhase::Idle => true,
        GamePhase::Ended => false,
        GamePhase::Playing => {
            let bird = &state.bird;
            if bird.pos.y < CEILING_MARGIN || bird.vel < 0.0 {
                return false;
            }

            let aim = match next_pillar(state) {
                Some(pillar) => pillar.gap_bottom().min(state.tuning.floor_y()) - GAP_MARGIN,
                None => state.tuning.floor_y() * 0.6,
            };
            let predicted_bottom = bird.pos.y + bird.size.y + bird.vel * LOOKAHEAD_SECS;
            predicted_bottom > aim
        }
    }
}
