//! Game state and core simulation types
//!
//! One `GameState` is one game: avatar, gates, frame clock, score and
//! lifecycle. Nothing here is global, so tests can run many games side by side.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, Viewport};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Waiting for the first start input
    Idle,
    /// Physics and gates active
    Running,
    /// Run ended, scene frozen until restart
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Fixed after creation
    pub x: f64,
    pub y: f64,
    /// Vertical speed, positive = downward
    pub velocity: f64,
    /// Collision half-extent
    pub radius: f64,
}

impl Avatar {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            x: viewport.avatar_x(),
            y: viewport.height / 2.0,
            velocity: 0.0,
            radius: viewport.avatar_radius(),
        }
    }

    /// Back to the vertical center, at rest
    pub fn reset(&mut self, viewport: &Viewport) {
        self.y = viewport.height / 2.0;
        self.velocity = 0.0;
    }

    /// Replace (not add to) the current velocity with an upward impulse
    pub fn flap(&mut self, jump_impulse: f64) {
        self.velocity = -jump_impulse;
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

/// A gate: a top barrier and a bottom barrier with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Left edge
    pub x: f64,
    /// Bottom of the upper barrier
    pub top_edge: f64,
    /// Top of the lower barrier
    pub bottom_edge: f64,
    /// Already scored
    pub passed: bool,
}

impl Gate {
    pub fn new(x: f64, top_edge: f64, gap: f64) -> Self {
        Self {
            x,
            top_edge,
            bottom_edge: top_edge + gap,
            passed: false,
        }
    }

    #[inline]
    pub fn right_edge(&self, gate_width: f64) -> f64 {
        self.x + gate_width
    }

    #[inline]
    pub fn gap(&self) -> f64 {
        self.bottom_edge - self.top_edge
    }
}

/// Notifications for the audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A reset happened and a new run began
    RunStarted,
    /// A gate was cleared
    Scored { score: u32 },
    /// The run ended
    GameOver { final_score: u32 },
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current play area
    pub viewport: Viewport,
    /// Constants resolved for the current viewport
    pub tuning: Tuning,
    pub avatar: Avatar,
    /// Gates in spawn order, oldest first
    pub gates: Vec<Gate>,
    /// Frames rendered since the last reset
    pub frame_counter: u64,
    pub score: u32,
    pub lifecycle: Lifecycle,
    /// Background scroll offset, in (-width, 0]
    pub bg_offset: f64,
    /// Seed the gate RNG was created from
    pub seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game for the given viewport
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self {
            viewport,
            tuning: Tuning::for_viewport(&viewport),
            avatar: Avatar::new(&viewport),
            gates: Vec::new(),
            frame_counter: 0,
            score: 0,
            lifecycle: Lifecycle::Idle,
            bg_offset: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Take all notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Notifications not yet drained
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Apply a new viewport size
    ///
    /// Re-resolves tuning and the avatar radius. The avatar keeps its x and
    /// gates keep their edges. Returns false (and changes nothing) for a
    /// degenerate size.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_valid() {
            log::warn!(
                "Ignoring invalid viewport {}x{}",
                viewport.width,
                viewport.height
            );
            return false;
        }

        let previous_class = self.viewport.device_class();
        self.viewport = viewport;
        self.tuning = Tuning::for_viewport(&viewport);
        self.avatar.radius = viewport.avatar_radius();

        let class = viewport.device_class();
        if class != previous_class {
            log::info!("Device class changed to {}", class.as_str());
        }
        true
    }
}
