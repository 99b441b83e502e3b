//! Shape generation for 2D primitives
//!
//! All coordinates are screen pixels; conversion to NDC happens in the
//! pipeline.

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    quad([min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)], color)
}

/// Rectangle rotated by `rotation` radians about its centre
pub fn rotated_rect(min: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    if rotation == 0.0 {
        return rect(min, size, color);
    }
    let center = min + size * 0.5;
    let half = size * 0.5;
    let rot = Vec2::from_angle(rotation);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|c| center + rot.rotate(c));
    quad(corners, color)
}

/// Hollow rectangle made of four bars of the given thickness
pub fn rect_outline(min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(min, Vec2::new(size.x, t), color));
    vertices.extend(rect(Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color));
    vertices.extend(rect(Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    ));
    vertices
}

/// Corners in winding order -> two triangles
fn quad(c: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(c[0].x, c[0].y, color),
        Vertex::new(c[1].x, c[1].y, color),
        Vertex::new(c[2].x, c[2].y, color),
        Vertex::new(c[2].x, c[2].y, color),
        Vertex::new(c[3].x, c[3].y, color),
        Vertex::new(c[0].x, c[0].y, color),
    ]
}
