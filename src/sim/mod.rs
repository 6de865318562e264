//! Header simulation module
//!
//! All stateful behavior lives here. This module must stay platform-free:
//! - One update per display frame
//! - Seeded RNG only
//! - Side effects surface as `HeaderEvent`s for the host to play

pub mod state;
pub mod tick;

pub use state::{
    CENTER_INDEX, FireParticle, HeaderEvent, HeaderState, MUSICIAN_COUNT, Musician, Note, SCALE,
    Star, Viewport, look_offset,
};
pub use tick::{FrameInput, decay_fire, tick, trigger_musician};
