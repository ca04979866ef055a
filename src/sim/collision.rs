//! Collision tests between the avatar, the play area bounds and gates
//!
//! The avatar is treated as a square of half-extent `radius` for gate tests,
//! which is what the game has always done; it is slightly unforgiving at
//! the gate corners.

use super::state::{Avatar, Gate};
use crate::tuning::Viewport;

/// Result of checking the avatar against the ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundContact {
    /// Above the ground bar
    Clear,
    /// Touching or below it; `resting_y` puts the avatar on top of the bar
    Hit { resting_y: f64 },
}

/// Check the avatar against the top of the ground bar
pub fn ground_contact(avatar: &Avatar, viewport: &Viewport) -> GroundContact {
    let ground_top = viewport.ground_top();
    if avatar.bottom() > ground_top {
        GroundContact::Hit {
            resting_y: ground_top - avatar.radius,
        }
    } else {
        GroundContact::Clear
    }
}

/// Avatar poking above the top of the play area
#[inline]
pub fn hits_ceiling(avatar: &Avatar) -> bool {
    avatar.top() < 0.0
}

/// Avatar overlaps the gate's columns horizontally
#[inline]
pub fn overlaps_gate_columns(avatar: &Avatar, gate: &Gate, gate_width: f64) -> bool {
    avatar.x + avatar.radius > gate.x && avatar.x - avatar.radius < gate.x + gate_width
}

/// Avatar extends outside the gate's gap vertically
#[inline]
pub fn outside_gap(avatar: &Avatar, gate: &Gate) -> bool {
    avatar.top() < gate.top_edge || avatar.bottom() > gate.bottom_edge
}

/// Avatar is touching one of the gate's barriers
pub fn hits_gate(avatar: &Avatar, gate: &Gate, gate_width: f64) -> bool {
    overlaps_gate_columns(avatar, gate, gate_width) && outside_gap(avatar, gate)
}

/// Gate's right edge is behind the avatar's center
#[inline]
pub fn gate_cleared(avatar: &Avatar, gate: &Gate, gate_width: f64) -> bool {
    gate.right_edge(gate_width) < avatar.x
}

/// Gate has fully left the screen
#[inline]
pub fn gate_offscreen(gate: &Gate, gate_width: f64) -> bool {
    gate.right_edge(gate_width) < 0.0
}
