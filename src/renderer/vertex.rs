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

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.439, 0.773, 0.808, 1.0]; // #70c5ce
    pub const SKY_ALT: [f32; 4] = [0.478, 0.800, 0.835, 1.0]; // Second tile, shows the scroll
    pub const GROUND: [f32; 4] = [1.0, 0.149, 0.0, 1.0]; // #ff2600
    pub const AVATAR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const GATE: [f32; 4] = [0.133, 0.545, 0.133, 1.0]; // #228B22
    pub const CLEAR: [f32; 4] = [0.439, 0.773, 0.808, 1.0];
}
