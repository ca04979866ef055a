//! Sky Gates - a flappy-style gate runner for the browser
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (avatar physics, gates, scoring, lifecycle)
//! - `tuning`: Viewport-derived, device-dependent gameplay constants
//! - `renderer`: Scene tessellation and WebGPU pipeline
//! - `settings`: Player preferences (LocalStorage on web)
//! - `ui`: Score display and overlays
//! - `audio`: Background music and hit sound (web only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{DeviceClass, Tuning, Viewport};

/// Game configuration constants
///
/// Everything here is a ratio of the viewport so the game scales with the
/// window. Device-dependent physics lives in [`tuning::Tuning`].
pub mod consts {
    /// Avatar horizontal position as a fraction of viewport width
    pub const AVATAR_X_RATIO: f64 = 0.2;
    /// Avatar collision radius as a fraction of viewport height
    pub const AVATAR_RADIUS_RATIO: f64 = 0.03;

    /// Ground bar height as a fraction of viewport height
    pub const GROUND_HEIGHT_RATIO: f64 = 0.1;

    /// Gate width as a fraction of viewport width
    pub const GATE_WIDTH_RATIO: f64 = 0.1;
    /// Top edge of a new gate is drawn from [0, height * this)
    pub const GATE_TOP_RANGE_RATIO: f64 = 0.5;

    /// Gap ratios by score band: (exclusive score limit, gap / viewport height)
    pub const GAP_BANDS: [(u32, f64); 4] = [(100, 0.30), (200, 0.25), (300, 0.20), (500, 0.17)];
    /// Gap ratio once the score is past every band
    pub const GAP_RATIO_FLOOR: f64 = 0.14;

    /// Viewports narrower than this (logical px) use compact tuning
    pub const COMPACT_WIDTH_THRESHOLD: f64 = 768.0;
}
