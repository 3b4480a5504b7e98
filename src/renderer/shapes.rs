//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in arena coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, d, a] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ],
        color,
    );
    vertices
}

/// Square of edge `size` centered on `center`, rotated by `angle`
pub fn square(center: Vec2, size: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|c| center + rot.rotate(c));

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, corners, color);
    vertices
}

/// Straight line of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [from + perp, to + perp, to - perp, from - perp],
        color,
    );
    vertices
}

/// Health bar: dark backing plus a fill proportional to `fraction`
pub fn health_bar(origin: Vec2, width: f32, height: f32, fraction: f32, fill: [f32; 4], back: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = rect(origin, Vec2::new(width, height), back);
    let filled = width * fraction.clamp(0.0, 1.0);
    if filled > 0.0 {
        vertices.extend(rect(origin, Vec2::new(filled, height), fill));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 10.0, [1.0; 4], 16).len(), 48);
    }

    #[test]
    fn test_rotated_square_is_diamond() {
        let verts = square(Vec2::ZERO, 2.0_f32.sqrt() * 2.0, PI / 4.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        // First corner (-h, -h) rotated 45 degrees lands on the -y axis
        let p = verts[0].position;
        assert!(p[0].abs() < 1e-5);
        assert!((p[1] + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_health_bar_fill() {
        let full = health_bar(Vec2::ZERO, 32.0, 4.0, 1.0, [1.0; 4], [0.0; 4]);
        assert_eq!(full.len(), 12);
        let empty = health_bar(Vec2::ZERO, 32.0, 4.0, 0.0, [1.0; 4], [0.0; 4]);
        assert_eq!(empty.len(), 6);
        let half = health_bar(Vec2::ZERO, 32.0, 4.0, 0.5, [1.0; 4], [0.0; 4]);
        let max_x = half[6..].iter().map(|v| v.position[0]).fold(0.0, f32::max);
        assert_eq!(max_x, 16.0);
    }

    #[test]
    fn test_degenerate_line() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
    }
}
