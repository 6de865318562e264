//! Ambient particle field
//!
//! Sparks and music notes floating up behind the page content. Style data is
//! rolled once per page load; the browser animates it with CSS keyframes.

use rand::Rng;

/// What floats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Spark,
    Note,
}

/// Glyphs cycled through by note particles
pub const NOTE_GLYPHS: [char; 6] = ['♪', '♫', '♩', '♬', '♭', '♮'];

/// Rolled style for one floating particle
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParticle {
    pub kind: FieldKind,
    /// Horizontal position, percent of the container
    pub left_pct: f32,
    /// Seconds per rise cycle
    pub duration_s: f32,
    /// Seconds already elapsed at page load (applied as a negative delay)
    pub delay_s: f32,
    pub opacity: f32,
    pub scale: f32,
    pub glyph: Option<char>,
}

/// Roll `count` particles of one kind
pub fn generate_field(kind: FieldKind, count: usize, rng: &mut impl Rng) -> Vec<FieldParticle> {
    (0..count)
        .map(|i| {
            let (duration_s, opacity, scale) = match kind {
                FieldKind::Spark => (
                    3.0 + rng.random::<f32>() * 5.0,
                    0.3 + rng.random::<f32>() * 0.5,
                    0.5 + rng.random::<f32>(),
                ),
                FieldKind::Note => (
                    6.0 + rng.random::<f32>() * 8.0,
                    0.1 + rng.random::<f32>() * 0.3,
                    0.8 + rng.random::<f32>() * 0.5,
                ),
            };
            FieldParticle {
                kind,
                left_pct: rng.random::<f32>() * 100.0,
                duration_s,
                delay_s: rng.random::<f32>() * 10.0,
                opacity,
                scale,
                glyph: (kind == FieldKind::Note).then(|| NOTE_GLYPHS[i % NOTE_GLYPHS.len()]),
            }
        })
        .collect()
}

impl FieldParticle {
    /// Inline CSS for the particle's element
    pub fn inline_style(&self) -> String {
        let mut css = format!(
            "position:absolute;bottom:0;left:{:.2}%;opacity:{:.2};\
             animation:rise {:.2}s linear infinite, sway {:.2}s ease-in-out infinite alternate;\
             animation-delay:-{:.2}s;will-change:transform,opacity;",
            self.left_pct,
            self.opacity,
            self.duration_s,
            self.duration_s / 2.0,
            self.delay_s,
        );
        match self.kind {
            FieldKind::Spark => {
                let px = self.scale * 3.0;
                css.push_str(&format!(
                    "width:{px:.2}px;height:{px:.2}px;border-radius:9999px;\
                     background:#f97316;filter:blur(1px);"
                ));
            }
            FieldKind::Note => {
                css.push_str(&format!(
                    "font-family:serif;font-size:{:.2}rem;color:rgba(255,255,255,0.4);",
                    self.scale * 1.5
                ));
            }
        }
        css
    }
}

/// Keyframes the inline animations refer to
pub const KEYFRAMES_CSS: &str = "\
@keyframes rise {\
  0% { transform: translateY(100vh) scale(0.5); opacity: 0; }\
  20% { opacity: 1; }\
  100% { transform: translateY(-20vh) scale(1.2); opacity: 0; }\
}\
@keyframes sway {\
  0%, 100% { transform: translateX(0px); }\
  50% { transform: translateX(15px); }\
}";

#[cfg(target_arch = "wasm32")]
pub use web::{inject_keyframes, populate};

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{Document, Element};

    use super::{FieldParticle, KEYFRAMES_CSS};
    use crate::error::HeaderResult;

    const KEYFRAMES_ID: &str = "sarau-ambient-keyframes";

    /// Add the keyframes stylesheet once per document
    pub fn inject_keyframes(document: &Document) -> HeaderResult<()> {
        if document.get_element_by_id(KEYFRAMES_ID).is_some() {
            return Ok(());
        }
        let style = document.create_element("style")?;
        style.set_id(KEYFRAMES_ID);
        style.set_text_content(Some(KEYFRAMES_CSS));
        if let Some(head) = document.head() {
            head.append_child(&style)?;
        }
        Ok(())
    }

    /// Append one element per particle into `container`
    pub fn populate(document: &Document, container: &Element, particles: &[FieldParticle]) -> HeaderResult<()> {
        for p in particles {
            let el = document.create_element("div")?;
            el.set_attribute("style", &p.inline_style())?;
            el.set_attribute("aria-hidden", "true")?;
            if let Some(glyph) = p.glyph {
                el.set_text_content(Some(&glyph.to_string()));
            }
            container.append_child(&el)?;
        }
        log::debug!("Ambient field: {} particles", particles.len());
        Ok(())
    }
}
