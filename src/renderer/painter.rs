//! Drawing primitives for the 2D header
//!
//! The scene only needs flat rectangles and a bit of text, so the canvas is
//! reached through this small trait. Tests swap in a recorder.

/// Flat-color 2D drawing surface
pub trait Painter {
    fn set_fill(&mut self, color: &str);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

/// Colors for scene elements
pub mod colors {
    pub const SKY: &str = "#0f0518";
    pub const MOON: &str = "#fbbf24";
    pub const GROUND: &str = "#1e1b4b";
    pub const GRASS: &str = "#3fab5a";
    pub const LOG: &str = "#78350f";
    pub const SHADOW: &str = "rgba(0,0,0,0.3)";
    pub const LABEL: &str = "rgba(255,255,255,0.5)";
    pub const HELP: &str = GRASS;
}

/// CSS color for a white star at the given alpha
pub fn star_color(alpha: f32) -> String {
    format!("rgba(255,255,255,{alpha})")
}

#[cfg(target_arch = "wasm32")]
impl Painter for web_sys::CanvasRenderingContext2d {
    fn set_fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        web_sys::CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, w as f64, h as f64);
    }

    fn set_font(&mut self, font: &str) {
        web_sys::CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_align(&mut self, align: &str) {
        web_sys::CanvasRenderingContext2d::set_text_align(self, align);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        web_sys::CanvasRenderingContext2d::fill_text(self, text, x as f64, y as f64).ok();
    }
}

/// A single recorded draw call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect { color: String, x: f32, y: f32, w: f32, h: f32 },
    Text { color: String, font: String, text: String, x: f32, y: f32 },
}

/// Painter that remembers every call, for scene tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
    fill: String,
    font: String,
}

#[cfg(test)]
impl RecordingPainter {
    pub fn rects_of(&self, color: &str) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Rect { color: fill, .. } if fill == color))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Painter for RecordingPainter {
    fn set_fill(&mut self, color: &str) {
        self.fill = color.to_string();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Rect {
            color: self.fill.clone(),
            x,
            y,
            w,
            h,
        });
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_align(&mut self, _align: &str) {}

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            color: self.fill.clone(),
            font: self.font.clone(),
            text: text.to_string(),
            x,
            y,
        });
    }
}
