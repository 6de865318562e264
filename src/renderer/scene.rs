//! Scene drawing
//!
//! Draws an already-updated `HeaderState`. Nothing here mutates the
//! simulation; the frame step has done that by the time we paint.

use super::painter::{Painter, colors, star_color};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{HeaderState, Musician, look_offset};

/// Help line shown across the top of the header
pub const HELP_TEXT: &str = "CLIQUE OU TECLE 1-7";

/// Paint the whole header, back to front
pub fn draw_scene(p: &mut impl Painter, state: &HeaderState, settings: &Settings) {
    let vp = state.viewport;
    let ground = vp.ground();

    draw_sky(p, vp.width, vp.height);
    draw_stars(p, state);
    draw_ground(p, vp.width, vp.height, ground);

    // Log under the fire
    let emitter = vp.emitter();
    p.set_fill(colors::LOG);
    p.fill_rect(emitter.x - 25.0, emitter.y, 50.0, 10.0);

    for ember in &state.embers {
        if ember.life <= 0.0 {
            continue;
        }
        let size = ember.size(state.fire_intensity);
        p.set_fill(ember.color());
        p.fill_rect(ember.pos.x, ember.pos.y, size, size);
    }

    for (i, m) in state.musicians.iter().enumerate() {
        draw_musician(p, m, i, ground);
    }

    if settings.show_help {
        p.set_fill(colors::HELP);
        p.set_font("10px monospace");
        p.set_text_align("center");
        p.fill_text(HELP_TEXT, vp.center_x(), 20.0);
    }
}

fn draw_sky(p: &mut impl Painter, width: f32, height: f32) {
    p.set_fill(colors::SKY);
    p.fill_rect(0.0, 0.0, width, height);

    // Moon with a crater notch
    p.set_fill(colors::MOON);
    p.fill_rect(width - 80.0, 40.0, 24.0, 24.0);
    p.set_fill(colors::SKY);
    p.fill_rect(width - 72.0, 48.0, 8.0, 8.0);
}

fn draw_stars(p: &mut impl Painter, state: &HeaderState) {
    for star in &state.stars {
        p.set_fill(&star_color(star.brightness()));
        p.fill_rect(star.pos.x, star.pos.y, STAR_SIZE, STAR_SIZE);
    }
}

fn draw_ground(p: &mut impl Painter, width: f32, height: f32, ground: f32) {
    p.set_fill(colors::GROUND);
    p.fill_rect(0.0, ground + 24.0, width, height);
    p.set_fill(colors::GRASS);
    p.fill_rect(0.0, ground + 24.0, width, 6.0);
}

fn draw_musician(p: &mut impl Painter, m: &Musician, index: usize, ground: f32) {
    let size = MUSICIAN_SIZE;
    let left = m.x - size / 2.0;
    let top = m.y - size;

    p.set_fill(m.note.color);
    p.fill_rect(left, top, size, size);

    // Eyes and smile, shifted toward the fire
    let look = look_offset(index);
    p.set_fill(m.face_ink());
    p.fill_rect(left + 4.0 + look, top + 6.0, 2.0, 2.0);
    p.fill_rect(left + 14.0 + look, top + 6.0, 2.0, 2.0);
    p.fill_rect(left + 4.0 + look, top + 12.0, 2.0, 2.0);
    p.fill_rect(left + 14.0 + look, top + 12.0, 2.0, 2.0);
    p.fill_rect(left + 6.0 + look, top + 14.0, 8.0, 2.0);

    if let Some(scale) = m.shadow_scale(ground) {
        p.set_fill(colors::SHADOW);
        p.fill_rect(m.x - 8.0 * scale, ground + 26.0, 16.0 * scale, 4.0);
    }

    p.set_fill(colors::LABEL);
    p.set_font("9px monospace");
    p.set_text_align("center");
    p.fill_text(m.note.key, m.x, ground + 40.0);
}
