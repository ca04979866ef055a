//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One `advance` per rendered frame, no wall-clock time
//! - Seeded RNG only
//! - Gates kept in spawn order

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{GroundContact, gate_cleared, gate_offscreen, ground_contact, hits_ceiling, hits_gate};
pub use state::{Avatar, GameEvent, GameState, Gate, Lifecycle};
pub use tick::{
    advance, advance_gates, autopilot_wants_flap, flap, gap_for_score, press, reset, spawn_gate,
    start, trigger_game_over, update_avatar,
};
