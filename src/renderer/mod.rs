//! Canvas 2D rendering module
//!
//! Pixel-art scene drawn with flat rectangles, back to front.

pub mod painter;
pub mod scene;

pub use painter::Painter;
pub use scene::draw_scene;
