//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert an sRGB hex color (0xRRGGBB) to a linear RGBA color
pub fn srgb(hex: u32, alpha: f32) -> [f32; 4] {
    fn channel(c: u32) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [
        channel((hex >> 16) & 0xff),
        channel((hex >> 8) & 0xff),
        channel(hex & 0xff),
        alpha,
    ]
}

/// Replace the alpha of a color
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements (sRGB hex)
pub mod colors {
    pub const SKY_TOP: u32 = 0x020024;
    pub const SKY_BOTTOM: u32 = 0x0f2027;
    pub const STAR: u32 = 0xffffff;
    pub const MOON: u32 = 0xfff9c4;
    pub const MOON_GLOW: u32 = 0xffffdc;
    pub const GROUND: u32 = 0x0b1c1f;
    pub const PILLAR: u32 = 0xffeb3b;
    pub const PILLAR_STRIP: u32 = 0xffffff;
    pub const BIRD: u32 = 0x4fc3ff;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb(0x000000, 1.0), [0.0, 0.0, 0.0, 1.0]);
        let white = srgb(0xffffff, 0.5);
        for c in &white[..3] {
            assert!((c - 1.0).abs() < 1e-6);
        }
        assert_eq!(white[3], 0.5);
    }

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
