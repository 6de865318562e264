//! Platform abstraction layer
//!
//! Browser glue for the header:
//! - Mount onto a canvas, size it to its container
//! - Display-synced frame loop with a cancellation handle
//! - Keyboard/click listeners and their removal on teardown
//! - Page decoration (ambient field, sign-up links)

pub mod frame_loop;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame_loop::FrameLoop;

#[cfg(target_arch = "wasm32")]
pub use web::{PixelHeader, decorate_page};
