//! Scene assembly
//!
//! Turns a [`FrameView`] into one triangle list, back to front: night sky,
//! stars, moon, ground, pillars, bird. Decoration randomness uses its own
//! RNG so it never disturbs the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors, srgb, with_alpha};
use crate::platform::FrameView;

pub const STAR_COUNT: usize = 80;
/// Stars only appear above this line
const STAR_FIELD_HEIGHT: f32 = 500.0;
/// Max alpha change per frame
const TWINKLE_STEP: f32 = 0.05;

const MOON_POS: Vec2 = Vec2::new(1000.0, 120.0);
const MOON_RADIUS: f32 = 50.0;

/// Inner highlight strip on each pillar
const STRIP_OFFSET: f32 = 8.0;
const STRIP_WIDTH: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Builds per-frame geometry and owns the animated background
#[derive(Debug)]
pub struct SceneBuilder {
    pub stars: Vec<Star>,
    rng: Pcg32,
    /// Skip twinkle and glow
    pub reduced_motion: bool,
    vertices: Vec<Vertex>,
}

impl SceneBuilder {
    pub fn new(seed: u64, field_width: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..field_width),
                    rng.random_range(0.0..STAR_FIELD_HEIGHT),
                ),
                radius: rng.random_range(0.5..2.5),
                alpha: rng.random_range(0.0..1.0),
            })
            .collect();

        Self {
            stars,
            rng,
            reduced_motion: false,
            vertices: Vec::new(),
        }
    }

    /// Random-walk every star's brightness
    pub fn twinkle(&mut self) {
        for star in &mut self.stars {
            star.alpha += (self.rng.random::<f32>() - 0.5) * TWINKLE_STEP;
            star.alpha = star.alpha.clamp(0.2, 1.0);
        }
    }

    /// Build the frame's vertex list (viewport coordinates)
    pub fn build(&mut self, view: &FrameView<'_>) -> &[Vertex] {
        if !self.reduced_motion {
            self.twinkle();
        }

        let tuning = view.tuning;
        let (w, h) = (tuning.viewport_width, tuning.viewport_height);
        let glow = !self.reduced_motion;
        let mut out = std::mem::take(&mut self.vertices);
        out.clear();

        // Sky
        shapes::gradient_rect(
            &mut out,
            Vec2::ZERO,
            Vec2::new(w, h),
            srgb(colors::SKY_TOP, 1.0),
            srgb(colors::SKY_BOTTOM, 1.0),
        );

        // Stars
        for star in &self.stars {
            shapes::circle(
                &mut out,
                star.pos,
                star.radius,
                srgb(colors::STAR, star.alpha),
                8,
            );
        }

        // Moon glow, then moon
        shapes::radial(
            &mut out,
            MOON_POS,
            MOON_RADIUS * 2.0,
            srgb(colors::MOON_GLOW, 0.9),
            srgb(colors::MOON_GLOW, 0.0),
            48,
        );
        shapes::circle(&mut out, MOON_POS, MOON_RADIUS, srgb(colors::MOON, 1.0), 48);

        // Ground
        shapes::rect(
            &mut out,
            Vec2::new(0.0, h - tuning.ground_height),
            Vec2::new(w, tuning.ground_height),
            srgb(colors::GROUND, 1.0),
        );

        // Pillars
        let pillar_color = srgb(colors::PILLAR, 1.0);
        let strip_color = srgb(colors::PILLAR_STRIP, 0.4);
        for pillar in view.pillars {
            let top_size = Vec2::new(tuning.pillar_width, pillar.height);
            let bottom_pos = Vec2::new(pillar.x, pillar.gap_bottom());
            let bottom_size = Vec2::new(tuning.pillar_width, h - pillar.gap_bottom());

            if glow {
                let halo = with_alpha(pillar_color, 0.5);
                shapes::glow_rect(&mut out, Vec2::new(pillar.x, 0.0), top_size, halo, 25.0, 5);
                shapes::glow_rect(&mut out, bottom_pos, bottom_size, halo, 25.0, 5);
            }
            shapes::rect(&mut out, Vec2::new(pillar.x, 0.0), top_size, pillar_color);
            shapes::rect(&mut out, bottom_pos, bottom_size, pillar_color);

            let strip_x = pillar.x + STRIP_OFFSET;
            shapes::rect(
                &mut out,
                Vec2::new(strip_x, 0.0),
                Vec2::new(STRIP_WIDTH, pillar.height),
                strip_color,
            );
            shapes::rect(
                &mut out,
                Vec2::new(strip_x, bottom_pos.y),
                Vec2::new(STRIP_WIDTH, bottom_size.y),
                strip_color,
            );
        }

        // Bird
        let bird_color = srgb(colors::BIRD, 1.0);
        if glow {
            shapes::glow_rect(&mut out, view.bird.pos, view.bird.size, bird_color, 20.0, 5);
        }
        shapes::rect(&mut out, view.bird.pos, view.bird.size, bird_color);

        self.vertices = out;
        &self.vertices
    }
}
