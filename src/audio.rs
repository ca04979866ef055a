//! Audio using HTML media elements
//!
//! Looping background music plus a one-shot hit sound. Browsers may refuse
//! to start playback outside a user gesture; that is reported, never fatal.

use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::settings::Settings;

const MUSIC_SRC: &str = "./assets/bg-song.mp3";
const HIT_SRC: &str = "./assets/hit-sound.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar hit a gate, the ground or the ceiling
    Hit,
}

/// Audio playback failures
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio element for {0} is unavailable")]
    Unavailable(&'static str),
    #[error("playback of {what} rejected: {reason}")]
    Rejected { what: &'static str, reason: String },
}

/// Audio manager for the game
pub struct AudioManager {
    music: Option<HtmlAudioElement>,
    hit: Option<HtmlAudioElement>,
    music_volume: f32,
    sfx_volume: f32,
    /// Music silenced because the window is in the background
    blurred: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
        match &music {
            Some(el) => el.set_loop(true),
            None => log::warn!("Failed to create music element - music disabled"),
        }
        let hit = HtmlAudioElement::new_with_src(HIT_SRC).ok();
        if hit.is_none() {
            log::warn!("Failed to create hit sound element - effects disabled");
        }

        let mut manager = Self {
            music,
            hit,
            music_volume: 0.0,
            sfx_volume: 0.0,
            blurred: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Pick up volume and mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.music_volume = settings.effective_music_volume();
        self.sfx_volume = settings.effective_sfx_volume();
        self.sync_volumes();
    }

    /// Silence (or restore) music while the page is in the background
    pub fn set_blurred(&mut self, blurred: bool) {
        self.blurred = blurred;
        self.sync_volumes();
    }

    fn sync_volumes(&self) {
        if let Some(music) = &self.music {
            let vol = if self.blurred { 0.0 } else { self.music_volume };
            music.set_volume(vol as f64);
        }
        if let Some(hit) = &self.hit {
            hit.set_volume(self.sfx_volume as f64);
        }
    }

    /// Rewind and start the background music
    ///
    /// A synchronous refusal is returned; an autoplay rejection arrives later
    /// through the play promise and is only logged.
    pub fn play_music(&self) -> Result<(), AudioError> {
        let music = self.music.as_ref().ok_or(AudioError::Unavailable("music"))?;
        music.set_current_time(0.0);
        start_playback(music, "music")
    }

    pub fn pause_music(&self) {
        if let Some(music) = &self.music {
            if let Err(e) = music.pause() {
                log::warn!("Failed to pause music: {:?}", e);
            }
        }
    }

    /// Play a sound effect from the beginning, even if it is still playing
    pub fn play(&self, effect: SoundEffect) -> Result<(), AudioError> {
        match effect {
            SoundEffect::Hit => {
                let hit = self.hit.as_ref().ok_or(AudioError::Unavailable("hit sound"))?;
                hit.set_current_time(0.0);
                start_playback(hit, "hit sound")
            }
        }
    }
}

fn start_playback(el: &HtmlAudioElement, what: &'static str) -> Result<(), AudioError> {
    let promise = el.play().map_err(|e| AudioError::Rejected {
        what,
        reason: describe(&e),
    })?;

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            let err = AudioError::Rejected {
                what,
                reason: describe(&e),
            };
            log::warn!("{} - will play after the next user interaction", err);
        }
    });
    Ok(())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
