//! Device-dependent game balance
//!
//! Phones get softer physics and slower gates. The choice is made from the
//! viewport width and resolved once per viewport change.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Logical size of the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn ground_height(&self) -> f64 {
        self.height * GROUND_HEIGHT_RATIO
    }

    /// Y coordinate of the top of the ground bar
    #[inline]
    pub fn ground_top(&self) -> f64 {
        self.height - self.height * GROUND_HEIGHT_RATIO
    }

    #[inline]
    pub fn gate_width(&self) -> f64 {
        self.width * GATE_WIDTH_RATIO
    }

    #[inline]
    pub fn avatar_x(&self) -> f64 {
        self.width * AVATAR_X_RATIO
    }

    #[inline]
    pub fn avatar_radius(&self) -> f64 {
        self.height * AVATAR_RADIUS_RATIO
    }

    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_width(self.width)
    }
}

/// Coarse device classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Narrow screens (phones)
    Compact,
    /// Everything else
    Regular,
}

impl DeviceClass {
    pub fn from_width(width: f64) -> Self {
        if width < COMPACT_WIDTH_THRESHOLD {
            DeviceClass::Compact
        } else {
            DeviceClass::Regular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Compact => "compact",
            DeviceClass::Regular => "regular",
        }
    }
}

/// Physics and pacing constants for one device class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward acceleration added to velocity each frame
    pub gravity: f64,
    /// Upward speed set by a flap
    pub jump_impulse: f64,
    /// Gate speed as a fraction of viewport width per frame
    pub pipe_speed_ratio: f64,
    /// Frames between gate spawns
    pub spawn_interval_frames: u64,
    /// Background scroll as a fraction of viewport width per frame
    pub bg_scroll_ratio: f64,
}

impl Tuning {
    pub fn for_class(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Compact => Self {
                gravity: 0.18,
                jump_impulse: 5.0,
                pipe_speed_ratio: 0.0028,
                spawn_interval_frames: 120,
                bg_scroll_ratio: 0.001,
            },
            DeviceClass::Regular => Self {
                gravity: 0.25,
                jump_impulse: 6.0,
                pipe_speed_ratio: 0.004,
                spawn_interval_frames: 100,
                bg_scroll_ratio: 0.0015,
            },
        }
    }

    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self::for_class(viewport.device_class())
    }

    /// Horizontal gate movement per frame in px
    #[inline]
    pub fn pipe_speed(&self, viewport: &Viewport) -> f64 {
        viewport.width * self.pipe_speed_ratio
    }

    /// Background movement per frame in px
    #[inline]
    pub fn bg_scroll_speed(&self, viewport: &Viewport) -> f64 {
        viewport.width * self.bg_scroll_ratio
    }
}
