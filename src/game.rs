//! Frame driver
//!
//! Owns the simulation state and the frame clock, and is the only place
//! where simulation events turn into cues, saves and draws.

use rand::RngCore;
use rand_pcg::Pcg32;

use crate::platform::{Collaborators, Cue, FrameView, ScoreStore};
use crate::sim::autopilot;
use crate::sim::{FrameClock, GameEvent, GamePhase, GameState, Tuning, primary_action, tick};

/// Game instance holding all state
#[derive(Debug)]
pub struct Game<R = Pcg32> {
    pub state: GameState<R>,
    clock: FrameClock,
    /// Let the autopilot press the button
    pub autopilot: bool,
}

impl Game<Pcg32> {
    /// Start a session, reading the stored best score once
    pub fn new(seed: u64, tuning: Tuning, store: &mut dyn ScoreStore) -> Self {
        let best = store.load_best_score();
        log::info!("Game initialized with seed {} (best {})", seed, best);
        Self::with_state(GameState::new(seed, tuning, best))
    }
}

impl<R: RngCore> Game<R> {
    pub fn with_state(state: GameState<R>) -> Self {
        let clock = FrameClock::new(state.tuning.max_frame_dt);
        Self {
            state,
            clock,
            autopilot: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Player pressed the button
    pub fn primary_action(&mut self, io: &mut Collaborators<'_>) {
        primary_action(&mut self.state);
        self.dispatch_events(io);
    }

    /// One display refresh. `now_ms` is the frame timestamp.
    pub fn frame(&mut self, now_ms: f64, io: &mut Collaborators<'_>) {
        let Some(dt) = self.clock.advance(now_ms) else {
            return;
        };

        if self.autopilot && autopilot::wants_flap(&self.state) {
            primary_action(&mut self.state);
        }
        if self.state.phase == GamePhase::Playing {
            tick(&mut self.state, dt, now_ms);
        }
        self.dispatch_events(io);

        io.renderer.draw(&self.view());
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            bird: &self.state.bird,
            pillars: &self.state.pillars,
            phase: self.state.phase,
            score: self.state.score,
            best_score: self.state.best_score,
            tuning: &self.state.tuning,
        }
    }

    fn dispatch_events(&mut self, io: &mut Collaborators<'_>) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => io.audio.play_cue(Cue::Jump),
                GameEvent::Scored { score } => {
                    log::debug!("Scored: {}", score);
                    io.audio.play_cue(Cue::Score);
                }
                GameEvent::Hit(_) => io.audio.play_cue(Cue::Hit),
                GameEvent::NewBest { score } => io.store.save_best_score(score),
                GameEvent::RoundReset => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::platform::{CuePlayer, FrameRenderer};
    use crate::sim::Pillar;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<Cue>,
        frames: Vec<(GamePhase, u32, u32)>,
    }

    impl CuePlayer for Recorder {
        fn play_cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    impl FrameRenderer for Recorder {
        fn draw(&mut self, view: &FrameView<'_>) {
            self.frames.push((view.phase, view.score, view.best_score));
        }
    }

    fn run<F>(store: &mut MemoryStore, rec: &mut Recorder, f: F)
    where
        F: FnOnce(&mut Collaborators<'_>),
    {
        let mut audio = Recorder::default();
        let mut renderer = Recorder::default();
        {
            let mut io = Collaborators {
                audio: &mut audio,
                store,
                renderer: &mut renderer,
            };
            f(&mut io);
        }
        rec.cues.extend(audio.cues);
        rec.frames.extend(renderer.frames);
    }

    #[test]
    fn test_loads_best_once() {
        let mut store = MemoryStore::with_best(42);
        let game = Game::new(1, Tuning::default(), &mut store);
        assert_eq!(game.state.best_score, 42);
        assert_eq!(game.state.seed, 1);
    }

    #[test]
    fn test_first_frame_is_skipped() {
        let mut store = MemoryStore::default();
        let mut game = Game::new(1, Tuning::default(), &mut store);
        let mut rec = Recorder::default();

        run(&mut store, &mut rec, |io| {
            game.primary_action(io);
            game.frame(5000.0, io);
        });
        // Seeding frame: no tick, no draw
        assert_eq!(game.state.bird.pos.y, 300.0);
        assert!(rec.frames.is_empty());
        assert_eq!(rec.cues, vec![Cue::Jump]);

        run(&mut store, &mut rec, |io| game.frame(5016.0, io));
        assert!(game.state.bird.pos.y < 300.0);
        assert_eq!(rec.frames.len(), 1);
        // First playing tick spawns straight away
        assert_eq!(game.state.pillars.len(), 1);
    }

    #[test]
    fn test_idle_frames_render_without_ticking() {
        let mut store = MemoryStore::default();
        let mut game = Game::new(1, Tuning::default(), &mut store);
        let mut rec = Recorder::default();

        run(&mut store, &mut rec, |io| {
            for i in 0..10 {
                game.frame(i as f64 * 16.0, io);
            }
        });
        assert_eq!(rec.frames.len(), 9);
        assert!(rec.frames.iter().all(|f| f.0 == GamePhase::Idle));
        assert_eq!(game.state.bird.pos.y, 300.0);
    }

    #[test]
    fn test_crash_plays_hit_and_saves_best() {
        let mut store = MemoryStore::with_best(0);
        let mut game = Game::new(3, Tuning::default(), &mut store);
        let mut rec = Recorder::default();

        run(&mut store, &mut rec, |io| {
            game.frame(0.0, io);
            game.primary_action(io);
        });
        game.state.score = 2;
        game.state.bird.pos.y = 700.0;
        game.state.bird.vel = 900.0;
        run(&mut store, &mut rec, |io| {
            game.frame(16.0, io);
            game.frame(32.0, io);
        });

        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(rec.cues, vec![Cue::Jump, Cue::Hit]);
        assert_eq!(store.best, Some(2));
        assert_eq!(store.saves, 1);
        assert_eq!(rec.frames.last(), Some(&(GamePhase::Ended, 2, 2)));

        // Restart -> Idle, nothing new to save
        run(&mut store, &mut rec, |io| game.primary_action(io));
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.state.score, 0);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_score_cue_per_pass() {
        let mut store = MemoryStore::default();
        let mut game = Game::new(3, Tuning::default(), &mut store);
        let mut rec = Recorder::default();

        run(&mut store, &mut rec, |io| {
            game.frame(0.0, io);
            game.primary_action(io);
        });
        game.state.bird.gravity = 0.0;
        game.state.bird.vel = 0.0;
        game.state.bird.pos.y = 350.0;
        game.state.spawner.last_spawn_ms = 1.0e12;
        game.state.pillars.push(Pillar::new(5.0, 200.0, 300.0));

        run(&mut store, &mut rec, |io| {
            for i in 1..30 {
                game.frame(i as f64 * 16.0, io);
            }
        });
        let scores = rec.cues.iter().filter(|c| **c == Cue::Score).count();
        assert_eq!(scores, 1);
        assert_eq!(game.state.score, 1);
    }

    #[test]
    fn test_autopilot_starts_round() {
        let mut store = MemoryStore::default();
        let mut game = Game::new(8, Tuning::default(), &mut store);
        game.autopilot = true;
        let mut rec = Recorder::default();

        run(&mut store, &mut rec, |io| {
            game.frame(0.0, io);
            game.frame(16.0, io);
        });
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(rec.cues.first(), Some(&Cue::Jump));
    }
}
