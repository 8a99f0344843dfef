//! Simulation step and input handling
//!
//! `tick` advances a round by one frame; `primary_action` is the only way
//! the player influences the game. Both mutate the same [`GameState`].

use rand::RngCore;

use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Handle the single gameplay input (space / click / tap)
pub fn primary_action<R: RngCore>(state: &mut GameState<R>) {
    match state.phase {
        GamePhase::Idle => {
            state.phase = GamePhase::Playing;
            state.bird.flap();
            state.events.push(GameEvent::Jumped);
            log::info!("Round {} started", state.rounds + 1);
        }
        GamePhase::Playing => {
            state.bird.flap();
            state.events.push(GameEvent::Jumped);
        }
        GamePhase::Ended => state.reset_round(),
    }
}

/// Advance the round by `dt` seconds. `now_ms` is the wall clock used for spawning.
pub fn tick<R: RngCore>(state: &mut GameState<R>, dt: f32, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.round_time += dt as f64;

    // Bird physics
    let max_fall = state.tuning.max_fall_speed;
    state.bird.integrate(dt, max_fall);

    // Scroll pillars, then drop the ones fully off the left edge
    let speed = state.tuning.pillar_speed;
    let width = state.tuning.pillar_width;
    for pillar in &mut state.pillars {
        pillar.x -= speed * dt;
    }
    state.pillars.retain(|p| p.right_edge(width) > 0.0);

    state.spawn_due(now_ms);

    // Collisions (scoring below still runs on the crash tick)
    if let Some(cause) = check_collision(state.bird.bounds(), &state.pillars, &state.tuning) {
        state.end_round(cause);
    }

    score_passed_pillars(state);
}

/// Award a point for every pillar whose right edge is now behind the bird
fn score_passed_pillars<R: RngCore>(state: &mut GameState<R>) {
    let bird_left = state.bird.pos.x;
    let width = state.tuning.pillar_width;

    for pillar in &mut state.pillars {
        if !pillar.passed && pillar.right_edge(width) < bird_left {
            pillar.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::CollisionKind;
    use crate::sim::state::Pillar;
    use crate::sim::tuning::Tuning;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default(), 0);
        primary_action(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_idle_to_playing_flaps() {
        let mut state = GameState::new(12345, Tuning::default(), 0);
        assert_eq!(state.phase, GamePhase::Idle);

        // Ticks are ignored until the first action
        tick(&mut state, 0.1, 1000.0);
        assert_eq!(state.bird.pos.y, 300.0);
        assert!(state.pillars.is_empty());

        primary_action(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel, -750.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);

        // Flapping again keeps playing
        state.bird.vel = 400.0;
        primary_action(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel, -750.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_closed_form_flight() {
        let mut state = playing_state();
        let (dt, g) = (0.1_f32, 2200.0_f32);

        let mut v = -750.0_f32;
        let mut y = 300.0_f32;
        for i in 0..5 {
            tick(&mut state, dt, 1000.0 + i as f64 * 100.0);
            v += g * dt;
            y += v * dt;
            assert!((state.bird.vel - v).abs() < 1e-3, "vel {} vs {}", state.bird.vel, v);
            assert!((state.bird.pos.y - y).abs() < 1e-3, "y {} vs {}", state.bird.pos.y, y);
        }
        assert!((state.bird.vel - 350.0).abs() < 1e-3);
        assert!((state.bird.pos.y - 255.0).abs() < 1e-2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pillar_crosses_viewport_in_expected_time() {
        let mut state = playing_state();
        // Keep the bird out of the way
        state.tuning.gravity = 0.0;
        state.bird.gravity = 0.0;
        state.bird.vel = 0.0;
        state.pillars.push(Pillar::new(1200.0, 120.0, 300.0));
        // No further spawns during the run
        state.spawner.last_spawn_ms = 1.0e12;

        let dt: f32 = 1.0 / 650.0;
        let steps = (1200.0 / 650.0 / dt).round() as usize;
        for _ in 0..steps {
            tick(&mut state, dt, 0.0);
        }
        assert!((state.round_time - 1200.0 / 650.0).abs() < 1e-3);
        let pillar = &state.pillars[0];
        assert!(pillar.x.abs() < 0.5, "x = {}", pillar.x);
    }

    #[test]
    fn test_prune_off_screen_pillars() {
        let mut state = playing_state();
        state.spawner.last_spawn_ms = 1.0e12;
        state.bird.gravity = 0.0;
        state.bird.vel = 0.0;
        state.pillars.push(Pillar::new(-119.0, 200.0, 300.0));
        state.pillars.push(Pillar::new(600.0, 200.0, 300.0));

        // Moves 6.5 units: first pillar's right edge lands at -5.5
        tick(&mut state, 0.01, 0.0);
        assert_eq!(state.pillars.len(), 1);
        assert!((state.pillars[0].x - 593.5).abs() < 1e-3);
    }

    #[test]
    fn test_score_once_per_pillar() {
        let mut state = playing_state();
        state.spawner.last_spawn_ms = 1.0e12;
        state.bird.gravity = 0.0;
        state.bird.vel = 0.0;
        state.bird.pos.y = 350.0;
        // Right edge just ahead of the bird's left edge (x = 120)
        state.pillars.push(Pillar::new(10.0, 200.0, 300.0));

        for _ in 0..20 {
            tick(&mut state, 0.005, 0.0);
        }
        assert_eq!(state.score, 1);
        assert!(state.pillars[0].passed);
        let scored: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();
        assert_eq!(scored, vec![GameEvent::Scored { score: 1 }]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ground_collision_ends_once() {
        let mut state = playing_state();
        state.bird.pos.y = 645.0;
        state.bird.vel = 900.0;

        tick(&mut state, 0.1, 1000.0);
        assert_eq!(state.phase, GamePhase::Ended);
        tick(&mut state, 0.1, 1100.0);

        let hits = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Hit(_)))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_ceiling_and_pillar_same_tick_single_hit() {
        let mut state = playing_state();
        state.spawner.last_spawn_ms = 1.0e12;
        state.bird.pos.y = 5.0;
        state.bird.vel = -750.0;
        state.pillars.push(Pillar::new(130.0, 400.0, 300.0));

        tick(&mut state, 0.02, 0.0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Hit(CollisionKind::Ceiling)]
        );
    }

    #[test]
    fn test_scoring_runs_on_crash_tick() {
        let mut state = playing_state();
        state.spawner.last_spawn_ms = 1.0e12;
        state.bird.gravity = 0.0;
        state.bird.vel = 0.0;
        state.bird.pos.y = 350.0;
        // About to be passed this tick
        state.pillars.push(Pillar::new(1.0, 200.0, 300.0));
        // And one blocking the bird
        state.pillars.push(Pillar::new(150.0, 500.0, 300.0));

        tick(&mut state, 0.01, 0.0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 1);
        // Best was promoted before the point landed
        assert_eq!(state.best_score, 0);

        primary_action(&mut state);
        assert_eq!(state.best_score, 1);
    }

    #[test]
    fn test_restart_sequence() {
        let mut state = GameState::new(99, Tuning::default(), 10);
        primary_action(&mut state);
        for i in 0..5 {
            tick(&mut state, 0.016, 1000.0 + i as f64 * 16.0);
        }
        assert!(!state.pillars.is_empty());
        state.score = 4;
        state.end_round(CollisionKind::Ground);
        state.drain_events();

        primary_action(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.pillars.is_empty());
        assert_eq!(state.bird.pos.y, 300.0);
        assert_eq!(state.bird.vel, 0.0);
        assert_eq!(state.spawner.last_spawn_ms, 0.0);
        assert_eq!(state.best_score, 10);
        assert_eq!(state.drain_events(), vec![GameEvent::RoundReset]);

        // Restart needs a second action to play again
        primary_action(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state();
        let mut b = playing_state();
        for i in 0..60 {
            let now = 2000.0 + i as f64 * 50.0;
            if i % 4 == 0 {
                primary_action(&mut a);
                primary_action(&mut b);
            }
            tick(&mut a, 0.016, now);
            tick(&mut b, 0.016, now);
        }
        assert_eq!(a.pillars, b.pillars);
        assert_eq!(a.bird, b.bird);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_velocity_never_exceeds_max(dts in prop::collection::vec(0.0f32..0.5, 1..40)) {
            let mut state = playing_state();
            let mut now = 1000.0;
            for dt in dts {
                now += dt as f64 * 1000.0;
                state.phase = GamePhase::Playing;
                tick(&mut state, dt, now);
                prop_assert!(state.bird.vel <= 900.0);
            }
        }

        #[test]
        fn prop_no_off_screen_pillars_after_tick(
            xs in prop::collection::vec(-300.0f32..1300.0, 0..12),
            dt in 0.0f32..0.2,
        ) {
            let mut state = playing_state();
            state.spawner.last_spawn_ms = 1.0e12;
            for x in xs {
                state.pillars.push(Pillar::new(x, 200.0, 300.0));
            }
            tick(&mut state, dt, 0.0);
            for p in &state.pillars {
                prop_assert!(p.x + 120.0 > 0.0);
            }
        }
    }
}
