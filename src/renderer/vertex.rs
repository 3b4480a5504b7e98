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
    /// 0xRRGGBB to linear-ish RGBA
    pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
        [
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
            alpha,
        ]
    }

    pub const BACKGROUND: [f32; 4] = hex(0x181825, 1.0);
    pub const PLAYER: [f32; 4] = hex(0x8B5CF6, 1.0);
    pub const PLAYER_GLOW: [f32; 4] = hex(0xFFFFFF, 0.15);
    pub const AIM: [f32; 4] = hex(0xC4B5FD, 1.0);
    pub const CROSSHAIR: [f32; 4] = hex(0x8B5CF6, 1.0);
    pub const RECRUIT: [f32; 4] = hex(0x34C759, 1.0);
    pub const TARGET_LINE: [f32; 4] = hex(0x8B5CF6, 1.0);
    pub const BAR_BACK: [f32; 4] = hex(0x222222, 1.0);
    pub const BAR_PLAYER: [f32; 4] = hex(0x10B981, 1.0);
    pub const BAR_ENEMY: [f32; 4] = hex(0xF59E42, 1.0);
    pub const BULLET_FRIENDLY: [f32; 4] = hex(0xFFD700, 1.0);
    pub const BULLET_HOSTILE: [f32; 4] = hex(0xEF4444, 1.0);
}

#[cfg(test)]
mod tests {
    use super::colors::hex;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xFF0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x00FF00, 0.5), [0.0, 1.0, 0.0, 0.5]);
    }
}
