//! Best score persistence
//!
//! The only persisted gameplay value is a single integer. In the browser it
//! lives in LocalStorage under [`BEST_SCORE_KEY`]; elsewhere it is kept in
//! memory for the lifetime of the process.

use crate::platform::ScoreStore;

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "highScore";

/// Parse a stored best score. Missing, negative or garbled values read as 0.
pub fn parse_best_score(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    if let Ok(score) = raw.parse::<u32>() {
        return score;
    }
    // Tolerate values written as floats ("12.0")
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.min(u32::MAX as f64) as u32,
        _ => {
            log::warn!("Ignoring unreadable best score {:?}", raw);
            0
        }
    }
}

/// In-process store (native builds and tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub best: Option<u32>,
    /// Number of saves performed
    pub saves: u32,
}

impl MemoryStore {
    pub fn with_best(best: u32) -> Self {
        Self {
            best: Some(best),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&mut self) -> u32 {
        self.best.unwrap_or(0)
    }

    fn save_best_score(&mut self, score: u32) {
        self.best = Some(score);
        self.saves += 1;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

/// The page's LocalStorage, if the browser grants access
#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best_score(&mut self) -> u32 {
        let raw = local_storage().and_then(|s| s.get_item(BEST_SCORE_KEY).ok().flatten());
        let best = parse_best_score(raw.as_deref());
        log::info!("Loaded best score: {}", best);
        best
    }

    fn save_best_score(&mut self, score: u32) {
        match local_storage() {
            Some(storage) => {
                if storage
                    .set_item(BEST_SCORE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("Failed to save best score {}", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, best score not saved"),
        }
    }
}
