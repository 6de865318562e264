//! Input mapping
//!
//! Turns raw key names and pointer coordinates into musician triggers.
//! Handlers run synchronously so the tone starts inside the user gesture.

use crate::sim::{HeaderState, MUSICIAN_COUNT, trigger_musician};

/// Musician index for a `KeyboardEvent.key` value ("1" -> 0 ... "7" -> 6)
pub fn key_to_index(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let digit = chars.next()?.to_digit(10)? as usize;
    if chars.next().is_some() {
        return None;
    }
    (1..=MUSICIAN_COUNT).contains(&digit).then(|| digit - 1)
}

/// Convert a client-space click into canvas units.
///
/// `rect_left`/`rect_width` are the canvas's on-screen box; `canvas_width` is
/// its drawing buffer width. Returns `None` for a collapsed element.
pub fn click_to_canvas_x(client_x: f32, rect_left: f32, rect_width: f32, canvas_width: f32) -> Option<f32> {
    if rect_width <= 0.0 {
        return None;
    }
    let scale = canvas_width / rect_width;
    Some((client_x - rect_left) * scale)
}

/// Indices of every musician whose hit band contains `x`
pub fn musicians_at(state: &HeaderState, x: f32) -> Vec<usize> {
    state
        .musicians
        .iter()
        .enumerate()
        .filter(|(_, m)| m.hit(x))
        .map(|(i, _)| i)
        .collect()
}

/// Handle a key press; returns whether a musician jumped
pub fn handle_key(state: &mut HeaderState, key: &str) -> bool {
    match key_to_index(key) {
        Some(index) => trigger_musician(state, index),
        None => false,
    }
}

/// Handle a click at canvas x; every musician under it is triggered.
/// Returns how many jumped.
pub fn handle_click(state: &mut HeaderState, x: f32) -> usize {
    let mut fired = 0;
    for index in musicians_at(state, x) {
        if trigger_musician(state, index) {
            fired += 1;
        }
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HeaderEvent, Viewport};

    fn state(width: f32) -> HeaderState {
        HeaderState::new(3, Viewport::new(width), width)
    }

    #[test]
    fn test_digit_keys_map_to_indices() {
        for (i, key) in ["1", "2", "3", "4", "5", "6", "7"].iter().enumerate() {
            assert_eq!(key_to_index(key), Some(i));
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ["0", "8", "9", "a", " ", "Enter", "F1", "", "11", "-1"] {
            assert_eq!(key_to_index(key), None, "key {key:?}");
        }
    }

    #[test]
    fn test_key_five_triggers_only_index_four() {
        let mut s = state(800.0);
        assert!(handle_key(&mut s, "5"));
        assert_eq!(s.events.len(), 1);
        assert!(matches!(s.events[0], HeaderEvent::Tone { musician: 4, .. }));
        for (i, m) in s.musicians.iter().enumerate() {
            if i == 4 {
                assert!(m.vy < 0.0);
            } else {
                assert_eq!(m.vy, 0.0);
            }
        }
    }

    #[test]
    fn test_unmapped_key_changes_nothing() {
        let mut s = state(800.0);
        assert!(!handle_key(&mut s, "x"));
        assert!(s.events.is_empty());
        assert!(s.musicians.iter().all(|m| m.vy == 0.0));
    }

    #[test]
    fn test_click_scale_correction() {
        // 400 css px showing an 800 px buffer
        assert_eq!(click_to_canvas_x(110.0, 10.0, 400.0, 800.0), Some(200.0));
        assert_eq!(click_to_canvas_x(50.0, 0.0, 0.0, 800.0), None);
    }

    #[test]
    fn test_click_on_center_musician() {
        let mut s = state(800.0);
        let x = s.musicians[3].x;
        assert_eq!(handle_click(&mut s, x), 1);
        assert!(matches!(s.events[0], HeaderEvent::Tone { musician: 3, .. }));
    }

    #[test]
    fn test_click_in_empty_space() {
        let mut s = state(800.0);
        assert_eq!(handle_click(&mut s, 10.0), 0);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_overlapping_bands_trigger_both() {
        // Narrow surface: gap 30, bands 50 wide overlap between neighbours
        let mut s = state(200.0);
        let midpoint = (s.musicians[0].x + s.musicians[1].x) / 2.0;
        assert_eq!(musicians_at(&s, midpoint), vec![0, 1]);
        assert_eq!(handle_click(&mut s, midpoint), 2);
    }
}
