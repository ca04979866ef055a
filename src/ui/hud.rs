//! DOM side of the HUD

use web_sys::{Document, Element};

use super::{HudUpdate, Overlay, START_PROMPT};
use crate::sim::{GameEvent, Lifecycle};

const SCORE_ID: &str = "score";
const START_PROMPT_ID: &str = "startPrompt";
const SCORECARD_ID: &str = "gameOverScreen";
const FINAL_SCORE_ID: &str = "finalScore";

/// Handles to the overlay elements; missing elements are skipped silently
pub struct Hud {
    score: Option<Element>,
    start_prompt: Option<Element>,
    scorecard: Option<Element>,
    final_score: Option<Element>,
    overlay: Option<Overlay>,
}

impl Hud {
    pub fn new(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("HUD element #{} not found", id);
            }
            el
        };

        let hud = Self {
            score: find(SCORE_ID),
            start_prompt: find(START_PROMPT_ID),
            scorecard: find(SCORECARD_ID),
            final_score: find(FINAL_SCORE_ID),
            overlay: None,
        };
        if let Some(el) = &hud.start_prompt {
            el.set_text_content(Some(START_PROMPT));
        }
        hud
    }

    /// Apply one engine notification
    pub fn apply(&self, event: &GameEvent) {
        let update = HudUpdate::for_event(event);

        if let (Some(el), Some(text)) = (&self.score, &update.score_text) {
            el.set_text_content(Some(text));
        }
        if let (Some(el), Some(text)) = (&self.final_score, &update.scorecard_text) {
            el.set_text_content(Some(text));
        }
        if update.hide_scorecard {
            set_visible(self.scorecard.as_ref(), false);
        }
        if update.scorecard_text.is_some() {
            set_visible(self.scorecard.as_ref(), true);
        }
    }

    /// Show the overlay that matches the lifecycle (only touches the DOM on change)
    pub fn sync_overlay(&mut self, lifecycle: Lifecycle) {
        let overlay = Overlay::for_lifecycle(lifecycle);
        if self.overlay == Some(overlay) {
            return;
        }
        self.overlay = Some(overlay);
        set_visible(self.start_prompt.as_ref(), overlay == Overlay::StartPrompt);
        set_visible(self.scorecard.as_ref(), overlay == Overlay::Scorecard);
    }
}

fn set_visible(el: Option<&Element>, visible: bool) {
    if let Some(el) = el {
        let classes = el.class_list();
        let _ = if visible {
            classes.remove_1("hidden")
        } else {
            classes.add_1("hidden")
        };
    }
}
