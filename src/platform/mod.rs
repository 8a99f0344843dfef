//! Platform abstraction layer
//!
//! The simulation never talks to the outside world directly. Everything it
//! needs from the host goes through these collaborator traits:
//! - Audio cues
//! - Best score storage
//! - Frame rendering

use crate::sim::{Bird, GamePhase, Pillar, Tuning};

/// Short sound effects triggered by gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Score,
    Hit,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Jump, Cue::Score, Cue::Hit];

    pub fn name(&self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Score => "score",
            Cue::Hit => "hit",
        }
    }

    /// Stable slot index (per-cue voice tables)
    pub fn index(&self) -> usize {
        match self {
            Cue::Jump => 0,
            Cue::Score => 1,
            Cue::Hit => 2,
        }
    }
}

/// Fire-and-forget sound playback
pub trait CuePlayer {
    fn play_cue(&mut self, cue: Cue);
}

/// Persistent best score
pub trait ScoreStore {
    /// Stored best score, 0 when missing or unreadable
    fn load_best_score(&mut self) -> u32;
    /// Best-effort save
    fn save_best_score(&mut self, score: u32);
}

/// Read-only snapshot handed to the renderer every frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub bird: &'a Bird,
    pub pillars: &'a [Pillar],
    pub phase: GamePhase,
    pub score: u32,
    pub best_score: u32,
    pub tuning: &'a Tuning,
}

/// Draws a frame; the result is never fed back into the simulation
pub trait FrameRenderer {
    fn draw(&mut self, view: &FrameView<'_>);
}

/// Borrowed set of collaborators for one driver call
pub struct Collaborators<'a> {
    pub audio: &'a mut dyn CuePlayer,
    pub store: &'a mut dyn ScoreStore,
    pub renderer: &'a mut dyn FrameRenderer,
}

/// Collaborators for runs without a window: cues and frames are only counted and logged
#[derive(Debug, Default)]
pub struct Headless {
    pub cue_counts: [u32; 3],
    pub frames_drawn: u64,
    last_phase: Option<GamePhase>,
}

impl Headless {
    pub fn cue_count(&self, cue: Cue) -> u32 {
        self.cue_counts[cue.index()]
    }
}

impl CuePlayer for Headless {
    fn play_cue(&mut self, cue: Cue) {
        self.cue_counts[cue.index()] += 1;
        log::debug!("cue: {}", cue.name());
    }
}

impl FrameRenderer for Headless {
    fn draw(&mut self, view: &FrameView<'_>) {
        self.frames_drawn += 1;
        if self.last_phase != Some(view.phase) {
            log::debug!(
                "frame {}: {:?} score={} best={} pillars={}",
                self.frames_drawn,
                view.phase,
                view.score,
                view.best_score,
                view.pillars.len()
            );
            self.last_phase = Some(view.phase);
        }
    }
}
