//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::assets::ImageId;

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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.07, 1.0];
    pub const SPACE: [f32; 4] = [0.05, 0.04, 0.12, 1.0];
    pub const SHIP: [f32; 4] = [0.85, 0.88, 0.95, 1.0];
    pub const FLOOR: [f32; 4] = [0.45, 0.32, 0.2, 1.0];
    pub const SPIRE: [f32; 4] = [0.55, 0.5, 0.45, 1.0];
    pub const ASTEROID: [f32; 4] = [0.5, 0.36, 0.25, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.55, 0.15, 0.85];
    pub const STAR: [f32; 4] = [1.0, 0.84, 0.2, 1.0];
    pub const SHIELD: [f32; 4] = [0.3, 0.7, 1.0, 0.35];
    pub const HITBOX: [f32; 4] = [1.0, 0.1, 0.4, 1.0];
}

/// Fill color for an image
pub fn image_color(image: ImageId, high_contrast: bool) -> [f32; 4] {
    let base = match image {
        ImageId::Background => colors::SPACE,
        ImageId::Ship => colors::SHIP,
        ImageId::Floor => colors::FLOOR,
        ImageId::SpireTop | ImageId::SpireBottom => colors::SPIRE,
        ImageId::Asteroid1 | ImageId::Asteroid2 | ImageId::Asteroid3 | ImageId::Asteroid4 => {
            colors::ASTEROID
        }
        ImageId::AsteroidExplosion => colors::EXPLOSION,
        ImageId::Star => colors::STAR,
        ImageId::Shield => colors::SHIELD,
    };
    if high_contrast {
        boost_contrast(base)
    } else {
        base
    }
}

/// Push each channel away from mid-grey
fn boost_contrast([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    let push = |c: f32| ((c - 0.5) * 1.6 + 0.5).clamp(0.0, 1.0);
    [push(r), push(g), push(b), a]
}
