//! Collision detection for axis-aligned geometry
//!
//! The bird is a box, pillars are two boxes around a gap, and the playfield is
//! bounded by the top of the viewport and the ground strip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Pillar;
use super::tuning::Tuning;

/// Axis-aligned rectangle in viewport space (y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap of the horizontal spans (touching edges don't count)
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Flew off the top of the screen
    Ceiling,
    /// Sank into the ground strip
    Ground,
    /// Hit a pillar segment (index into the live pillar list)
    Pillar { index: usize },
}

/// Check the bird against the viewport top and the ground line
pub fn bounds_collision(bird: Rect, floor_y: f32) -> Option<CollisionKind> {
    if bird.top() < 0.0 {
        Some(CollisionKind::Ceiling)
    } else if bird.bottom() > floor_y {
        Some(CollisionKind::Ground)
    } else {
        None
    }
}

/// Check the bird against one pillar pair
pub fn pillar_collision(bird: Rect, pillar: &Pillar, pillar_width: f32) -> bool {
    bird.overlaps_x(pillar.x, pillar.right_edge(pillar_width))
        && (bird.top() < pillar.height || bird.bottom() > pillar.gap_bottom())
}

/// First collision for this tick, bounds before pillars
pub fn check_collision(bird: Rect, pillars: &[Pillar], tuning: &Tuning) -> Option<CollisionKind> {
    bounds_collision(bird, tuning.floor_y()).or_else(|| {
        pillars
            .iter()
            .position(|p| pillar_collision(bird, p, tuning.pillar_width))
            .map(|index| CollisionKind::Pillar { index })
    })
}
