//! Score display and lifecycle overlays
//!
//! Text is drawn by the page, not the GPU. This module decides what the page
//! shows; `Hud` (web only) pushes it into the DOM.

use crate::sim::{GameEvent, Lifecycle};

#[cfg(target_arch = "wasm32")]
mod hud;
#[cfg(target_arch = "wasm32")]
pub use hud::Hud;

/// Prompt shown before the first run
pub const START_PROMPT: &str = "Press SPACE or TAP to Start";

/// Which overlay belongs on top of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    StartPrompt,
    /// Nothing over the canvas while a run is live
    Hidden,
    Scorecard,
}

impl Overlay {
    pub fn for_lifecycle(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Idle => Overlay::StartPrompt,
            Lifecycle::Running => Overlay::Hidden,
            Lifecycle::GameOver => Overlay::Scorecard,
        }
    }
}

/// Text for the score counter and the scorecard
pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

/// What the HUD must change in response to one engine event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudUpdate {
    /// New text for the running score counter
    pub score_text: Option<String>,
    /// New text for the scorecard, shown when set
    pub scorecard_text: Option<String>,
    /// Hide the scorecard
    pub hide_scorecard: bool,
}

impl HudUpdate {
    pub fn for_event(event: &GameEvent) -> Self {
        match *event {
            GameEvent::RunStarted => Self {
                score_text: Some(score_label(0)),
                scorecard_text: None,
                hide_scorecard: true,
            },
            GameEvent::Scored { score } => Self {
                score_text: Some(score_label(score)),
                scorecard_text: None,
                hide_scorecard: false,
            },
            GameEvent::GameOver { final_score } => Self {
                score_text: None,
                scorecard_text: Some(score_label(final_score)),
                hide_scorecard: false,
            },
        }
    }
}
