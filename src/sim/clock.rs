//! Frame clock
//!
//! Turns the display's monotonically increasing frame timestamps into
//! per-frame deltas. The very first timestamp only seeds the clock.

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: Option<f32>,
}

impl FrameClock {
    /// `max_dt` caps a single delta in seconds; `None` passes deltas through untouched
    pub fn new(max_dt: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Feed a frame timestamp (ms). Returns the delta in seconds, or `None`
    /// for the seeding frame.
    pub fn advance(&mut self, now_ms: f64) -> Option<f32> {
        let last = self.last_ms.replace(now_ms)?;
        let dt = (((now_ms - last) / 1000.0) as f32).max(0.0);
        Some(match self.max_dt {
            Some(max) => dt.min(max.max(0.0)),
            None => dt,
        })
    }
}
