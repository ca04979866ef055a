//! Scene tessellation
//!
//! Turns a `GameState` into colored triangles in screen pixels. Kept free of
//! GPU types so it can be tested natively.

use glam::Vec2;

use super::shapes::{CIRCLE_SEGMENTS, circle, rect};
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Per-frame render switches coming from settings
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneOptions {
    /// Draw the background at rest instead of at its scroll offset
    pub reduced_motion: bool,
}

/// Build the frame: background, ground, avatar, then gates
pub fn build_scene(state: &GameState, options: SceneOptions) -> Vec<Vertex> {
    let vp = state.viewport;
    let w = vp.width as f32;
    let h = vp.height as f32;
    let mut out = Vec::with_capacity(128 + state.gates.len() * 12);

    // Two tiles side by side so the wrap at one width is seamless
    let offset = if options.reduced_motion {
        0.0
    } else {
        state.bg_offset as f32
    };
    rect(&mut out, Vec2::new(offset, 0.0), Vec2::new(w, h), colors::SKY);
    rect(&mut out, Vec2::new(offset + w, 0.0), Vec2::new(w, h), colors::SKY_ALT);

    rect(
        &mut out,
        Vec2::new(0.0, vp.ground_top() as f32),
        Vec2::new(w, vp.ground_height() as f32),
        colors::GROUND,
    );

    let avatar = &state.avatar;
    circle(
        &mut out,
        Vec2::new(avatar.x as f32, avatar.y as f32),
        avatar.radius as f32,
        colors::AVATAR,
        CIRCLE_SEGMENTS,
    );

    // Gates stay drawn after game over so the crash site is visible behind the
    // scorecard; they stop moving because the sim no longer advances them
    let gate_width = vp.gate_width() as f32;
    for gate in &state.gates {
        let x = gate.x as f32;
        let bottom = gate.bottom_edge as f32;
        rect(
            &mut out,
            Vec2::new(x, 0.0),
            Vec2::new(gate_width, gate.top_edge as f32),
            colors::GATE,
        );
        rect(
            &mut out,
            Vec2::new(x, bottom),
            Vec2::new(gate_width, h - bottom),
            colors::GATE,
        );
    }

    out
}
