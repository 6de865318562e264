//! Header state and core simulation types
//!
//! Everything the frame loop and the input handlers touch lives in
//! [`HeaderState`], owned by the mount and dropped with it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::{ground_level, musician_gap};

/// One step of the C major scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Tone in Hz
    pub frequency: f32,
    /// Body color (CSS)
    pub color: &'static str,
    /// Keyboard digit that triggers it
    pub key: &'static str,
    /// Solfège name
    pub solfege: &'static str,
}

/// The seven notes, left to right
pub const SCALE: [Note; 7] = [
    Note { frequency: 261.63, color: "#ef4444", key: "1", solfege: "Dó" },
    Note { frequency: 293.66, color: "#f97316", key: "2", solfege: "Ré" },
    Note { frequency: 329.63, color: "#eab308", key: "3", solfege: "Mi" },
    Note { frequency: 349.23, color: "#22c55e", key: "4", solfege: "Fá" },
    Note { frequency: 392.00, color: "#06b6d4", key: "5", solfege: "Sol" },
    Note { frequency: 440.00, color: "#3b82f6", key: "6", solfege: "Lá" },
    Note { frequency: 493.88, color: "#a855f7", key: "7", solfege: "Si" },
];

/// Number of musicians on stage
pub const MUSICIAN_COUNT: usize = SCALE.len();

/// Index of the musician standing behind the fire
pub const CENTER_INDEX: usize = MUSICIAN_COUNT / 2;

/// A jumping, singing block
#[derive(Debug, Clone)]
pub struct Musician {
    pub note: Note,
    /// Horizontal center, re-derived from the surface width every frame
    pub x: f32,
    /// Feet position (never below the ground line)
    pub y: f32,
    /// Vertical velocity per frame
    pub vy: f32,
}

impl Musician {
    pub fn new(note: Note, ground: f32) -> Self {
        Self {
            note,
            x: 0.0,
            y: ground,
            vy: 0.0,
        }
    }

    /// Close enough to the ground to jump again
    pub fn can_jump(&self, ground: f32) -> bool {
        self.y >= ground - TRIGGER_THRESHOLD
    }

    pub fn is_airborne(&self, ground: f32) -> bool {
        self.y < ground
    }

    /// Apply one frame of vertical motion: move, fall while airborne, land
    pub fn integrate(&mut self, ground: f32) {
        self.y += self.vy;
        if self.y < ground {
            self.vy += GRAVITY;
        } else {
            self.y = ground;
            self.vy = 0.0;
        }
    }

    /// Shadow width factor; shrinks with height, `None` on the ground or when too high
    pub fn shadow_scale(&self, ground: f32) -> Option<f32> {
        if !self.is_airborne(ground) {
            return None;
        }
        let scale = 1.0 - (ground - self.y) / 100.0;
        (scale > 0.0).then_some(scale)
    }

    /// Whether the horizontal band around this musician contains `x`
    pub fn hit(&self, x: f32) -> bool {
        (x - self.x).abs() < HIT_HALF_WIDTH
    }

    /// Face color with enough contrast against the body
    pub fn face_ink(&self) -> &'static str {
        match self.note.key {
            "1" | "6" | "7" => "#ffffff",
            _ => "#000000",
        }
    }
}

/// Horizontal eye offset so each musician looks toward the fire
pub fn look_offset(index: usize) -> f32 {
    match index.cmp(&CENTER_INDEX) {
        std::cmp::Ordering::Less => 2.0,
        std::cmp::Ordering::Greater => -2.0,
        std::cmp::Ordering::Equal => 0.0,
    }
}

/// A campfire ember
#[derive(Debug, Clone)]
pub struct FireParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at birth, removed once it reaches 0
    pub life: f32,
}

impl FireParticle {
    /// Drawn edge length at the given intensity
    pub fn size(&self, intensity: f32) -> f32 {
        (self.life * EMBER_MAX_SIZE * intensity).max(1.0)
    }

    pub fn color(&self) -> &'static str {
        if self.life > EMBER_HOT_LIFE {
            "#ef4444"
        } else {
            "#fbbf24"
        }
    }
}

/// A twinkling background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub alpha: f32,
    /// Alpha change per frame; sign flips at the bounds
    pub twinkle: f32,
}

impl Star {
    /// Triangle-wave brightness step
    pub fn twinkle_step(&mut self) {
        self.alpha += self.twinkle;
        if self.alpha > 1.0 || self.alpha < 0.0 {
            self.twinkle = -self.twinkle;
        }
    }

    /// Alpha usable as a CSS color component
    pub fn brightness(&self) -> f32 {
        self.alpha.clamp(0.0, 1.0)
    }
}

/// Logical drawing surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: CANVAS_HEIGHT,
        }
    }

    /// Follow the container width; height stays fixed. Returns true on change.
    pub fn fit_width(&mut self, container_width: f32) -> bool {
        let width = container_width.max(0.0);
        if width != self.width {
            self.width = width;
            true
        } else {
            false
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn ground(&self) -> f32 {
        ground_level(self.height)
    }

    /// Ember spawn point (on top of the log)
    pub fn emitter(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.ground() + 20.0)
    }
}

/// Side effects produced by the simulation for the host to carry out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderEvent {
    /// A musician jumped and should sound its note
    Tone { musician: usize, frequency: f32 },
}

/// Complete header state for one mount
#[derive(Debug, Clone)]
pub struct HeaderState {
    pub viewport: Viewport,
    /// Left to right, one per scale step
    pub musicians: Vec<Musician>,
    /// 1.0 at rest, up to FIRE_MAX after a flurry of notes
    pub fire_intensity: f32,
    pub embers: Vec<FireParticle>,
    pub stars: Vec<Star>,
    /// Pending side effects, drained by the host
    pub events: Vec<HeaderEvent>,
    /// Frames advanced so far
    pub frame: u64,
    rng: Pcg32,
}

impl HeaderState {
    /// Create a header with stars scattered across `star_span` pixels
    pub fn new(seed: u64, viewport: Viewport, star_span: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let span = star_span.max(1.0);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * span,
                    rng.random::<f32>() * STAR_BAND_HEIGHT,
                ),
                alpha: rng.random::<f32>(),
                twinkle: TWINKLE_MIN + rng.random::<f32>() * TWINKLE_RANGE,
            })
            .collect();

        let ground = viewport.ground();
        let mut state = Self {
            viewport,
            musicians: SCALE.iter().map(|n| Musician::new(*n, ground)).collect(),
            fire_intensity: FIRE_BASELINE,
            embers: Vec::new(),
            stars,
            events: Vec::new(),
            frame: 0,
            rng,
        };
        state.layout_musicians();
        state
    }

    /// Evenly space musicians around the center
    pub fn layout_musicians(&mut self) {
        let gap = musician_gap(self.viewport.width);
        let center = self.viewport.center_x();
        for (i, m) in self.musicians.iter_mut().enumerate() {
            m.x = center + (i as f32 - CENTER_INDEX as f32) * gap;
        }
    }

    /// Uniform sample in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<HeaderEvent> {
        std::mem::take(&mut self.events)
    }
}
