//! Sarau header entry point
//!
//! On the web this mounts the header on `#pixel-header` and decorates the
//! page. Natively it runs a short headless session and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_page {
    use sarau_header::Settings;
    use sarau_header::platform::{PixelHeader, decorate_page};

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Sarau ao Natural starting...");
        let settings = Settings::load();

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Err(e) = decorate_page(&document, &settings) {
                log::warn!("Page decoration incomplete: {}", e);
            }
        }

        match PixelHeader::mount_by_id("pixel-header", settings) {
            Ok(header) => {
                // Lives as long as the page
                std::mem::forget(header);
            }
            Err(e) => log::warn!("Pixel header disabled: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sarau header (native) starting...");
    log::info!("The interactive header needs a browser - run with `trunk serve` for the web version");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a little tune against the simulation and report the fire
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use sarau_header::Settings;
    use sarau_header::audio::envelopes;
    use sarau_header::input::handle_key;
    use sarau_header::sim::{FrameInput, HeaderState, Viewport, tick};

    let settings = Settings::load();
    let mut state = HeaderState::new(2025, Viewport::new(800.0), 1280.0);
    let input = FrameInput {
        container_width: Some(800.0),
        freeze_stars: settings.reduced_motion,
    };

    // Dó Mi Sol Dó, a beat every 40 frames
    let tune = ["1", "3", "5", "1"];
    let mut tones = 0;
    for key in tune {
        handle_key(&mut state, key);
        tones += envelopes(&state.drain_events(), &settings).len();
        for _ in 0..40 {
            tick(&mut state, &input);
        }
        log::info!(
            "after '{}': fire {:.2}, {} embers in the air",
            key,
            state.fire_intensity,
            state.embers.len()
        );
    }

    println!(
        "{} frames, {} tones, fire intensity {:.2}",
        state.frame, tones, state.fire_intensity
    );
}
