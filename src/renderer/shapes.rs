//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in screen pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segments used for the avatar circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Axis-aligned rectangle as two triangles
///
/// Degenerate (non-positive) sizes produce nothing.
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;
    out.extend_from_slice(&[
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]);
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    if radius <= 0.0 || segments < 3 {
        return;
    }
    let step = TAU / segments as f32;
    for i in 0..segments {
        let a0 = i as f32 * step;
        let a1 = (i + 1) as f32 * step;
        let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radius;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
        out.extend_from_slice(&[
            Vertex::new(center.x, center.y, color),
            Vertex::new(p0.x, p0.y, color),
            Vertex::new(p1.x, p1.y, color),
        ]);
    }
}
