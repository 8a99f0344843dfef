//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, with_alpha};

/// Push an axis-aligned quad with per-edge colors (top, bottom)
fn quad(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) {
    let tl = Vertex::new(min.x, min.y, top);
    let tr = Vertex::new(max.x, min.y, top);
    let bl = Vertex::new(min.x, max.y, bottom);
    let br = Vertex::new(max.x, max.y, bottom);

    out.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
}

/// Filled rectangle
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    quad(out, pos, pos + size, color, color);
}

/// Rectangle with a vertical color gradient
pub fn gradient_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    quad(out, pos, pos + size, top, bottom);
}

/// Soft halo around a rectangle: stacked, increasingly transparent expansions
pub fn glow_rect(
    out: &mut Vec<Vertex>,
    pos: Vec2,
    size: Vec2,
    color: [f32; 4],
    blur: f32,
    layers: u32,
) {
    let n = layers as f32;
    for i in (1..=layers).rev() {
        let t = i as f32 / n;
        let grow = Vec2::splat(blur * t);
        // Outermost layer is faintest but still visible
        let alpha = color[3] * (1.0 - t + 1.0 / n) / n * 2.0;
        rect(out, pos - grow, size + grow * 2.0, with_alpha(color, alpha));
    }
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    radial(out, center, radius, color, color, segments);
}

/// Circle whose color fades from `inner` at the center to `outer` at the rim
pub fn radial(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, inner));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            outer,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            outer,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_is_two_triangles() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), RED);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_empty_rect_emits_nothing() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::ZERO, Vec2::new(0.0, 10.0), RED);
        gradient_rect(&mut out, Vec2::ZERO, Vec2::new(10.0, -1.0), RED, RED);
        assert!(out.is_empty());
    }

    #[test]
    fn test_gradient_colors_by_edge() {
        let blue = [0.0, 0.0, 1.0, 1.0];
        let mut out = Vec::new();
        gradient_rect(&mut out, Vec2::ZERO, Vec2::new(5.0, 5.0), RED, blue);
        for v in &out {
            let expected = if v.position[1] == 0.0 { RED } else { blue };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_glow_layers_are_translucent() {
        let mut out = Vec::new();
        glow_rect(&mut out, Vec2::ZERO, Vec2::splat(10.0), RED, 20.0, 4);
        assert_eq!(out.len(), 24);
        assert!(out.iter().all(|v| v.color[3] < 1.0));
    }

    #[test]
    fn test_every_glow_layer_is_visible() {
        let mut out = Vec::new();
        glow_rect(&mut out, Vec2::ZERO, Vec2::splat(10.0), RED, 20.0, 5);
        assert_eq!(out.len(), 30);
        assert!(out.iter().all(|v| v.color[3] > 0.0));
        // Widest (first emitted) layer is the faintest
        assert!(out[0].color[3] < out[out.len() - 1].color[3]);
    }

    #[test]
    fn test_radial_fades_to_rim() {
        let clear = with_alpha(RED, 0.0);
        let mut out = Vec::new();
        radial(&mut out, Vec2::ZERO, 5.0, RED, clear, 8);
        assert_eq!(out.len(), 24);
        assert_eq!(out[0].color, RED);
        assert_eq!(out[1].color, clear);
    }
}
