//! Sarau ao Natural - interactive 8-bit campfire header
//!
//! Core modules:
//! - `sim`: Header simulation (musician physics, fire particles, starfield)
//! - `input`: Keyboard/pointer mapping onto musician triggers
//! - `renderer`: Canvas 2D drawing of the scene
//! - `audio`: Square-wave tone synthesis via Web Audio
//! - `platform`: Browser mount, frame loop and teardown
//! - `ambient`, `site`: Page decoration and sign-up links

pub mod ambient;
pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod site;

pub use error::{HeaderError, HeaderResult};
pub use settings::Settings;

/// Header configuration constants
pub mod consts {
    /// Logical canvas height (width follows the container)
    pub const CANVAS_HEIGHT: f32 = 300.0;
    /// Ground line sits this far above the bottom edge
    pub const GROUND_OFFSET: f32 = 40.0;

    /// Musicians are only re-triggerable within this distance of the ground
    pub const TRIGGER_THRESHOLD: f32 = 5.0;
    /// Vertical velocity set by a trigger (per frame, negative is up)
    pub const JUMP_IMPULSE: f32 = -8.0;
    /// Added to vertical velocity every airborne frame
    pub const GRAVITY: f32 = 0.5;
    /// Body edge length
    pub const MUSICIAN_SIZE: f32 = 20.0;
    /// Half-width of the click band around each musician
    pub const HIT_HALF_WIDTH: f32 = 25.0;

    /// Musician spacing = width / GAP_DIVISOR, clamped to [MIN_GAP, MAX_GAP]
    pub const GAP_DIVISOR: f32 = 9.0;
    pub const MIN_GAP: f32 = 30.0;
    pub const MAX_GAP: f32 = 50.0;

    /// Fire intensity bounds and dynamics
    pub const FIRE_BASELINE: f32 = 1.0;
    pub const FIRE_MAX: f32 = 5.0;
    pub const FIRE_BOOST: f32 = 1.5;
    /// Multiplicative decay per frame while above baseline
    pub const FIRE_DECAY: f32 = 0.98;

    /// Spawn probability per frame = rate * intensity
    pub const EMBER_SPAWN_RATE: f32 = 0.3;
    /// Horizontal spread of the emitter at intensity 1
    pub const EMBER_SPREAD: f32 = 30.0;
    pub const EMBER_DRIFT: f32 = 3.0;
    pub const EMBER_RISE: f32 = -2.5;
    /// Life lost per frame at intensity 1
    pub const EMBER_FADE: f32 = 0.04;
    /// Embers above this life draw red, below it amber
    pub const EMBER_HOT_LIFE: f32 = 0.6;
    pub const EMBER_MAX_SIZE: f32 = 6.0;

    /// Starfield
    pub const STAR_COUNT: usize = 80;
    pub const STAR_BAND_HEIGHT: f32 = 200.0;
    pub const STAR_SIZE: f32 = 2.0;
    pub const TWINKLE_MIN: f32 = 0.01;
    pub const TWINKLE_RANGE: f32 = 0.05;

    /// Tone envelope
    pub const TONE_PEAK_GAIN: f32 = 0.05;
    pub const TONE_FLOOR_GAIN: f32 = 0.001;
    pub const TONE_DURATION: f64 = 0.4;
}

/// Ground line for a surface of the given height
#[inline]
pub fn ground_level(height: f32) -> f32 {
    height - consts::GROUND_OFFSET
}

/// Musician spacing for a surface width, clamped to [MIN_GAP, MAX_GAP]
#[inline]
pub fn musician_gap(width: f32) -> f32 {
    (width / consts::GAP_DIVISOR).clamp(consts::MIN_GAP, consts::MAX_GAP)
}
