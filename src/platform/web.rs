//! Browser mount of the pixel header
//!
//! One `PixelHeader` owns everything for one canvas: the simulation state,
//! the audio synth, the frame callback and the input listeners. Dropping it
//! (or calling `unmount`) stops the loop and removes the listeners.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::FrameLoop;
use crate::ambient::{self, FieldKind};
use crate::audio::{ToneSynth, envelopes};
use crate::consts::CANVAS_HEIGHT;
use crate::error::{HeaderError, HeaderResult};
use crate::input::{click_to_canvas_x, handle_click, handle_key};
use crate::renderer::draw_scene;
use crate::settings::Settings;
use crate::sim::{FrameInput, HeaderState, Viewport, tick, trigger_musician};
use crate::site;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything the callbacks share
struct Mount {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    state: HeaderState,
    settings: Settings,
    synth: ToneSynth,
    frame_loop: FrameLoop,
}

impl Mount {
    /// Width of the element the canvas should fill
    fn container_width(&self) -> Option<f32> {
        self.canvas
            .parent_element()
            .map(|parent| parent.client_width().max(0) as f32)
    }

    /// Update then draw one frame
    fn frame(&mut self) {
        let input = FrameInput {
            container_width: self.container_width(),
            freeze_stars: self.settings.reduced_motion,
        };
        tick(&mut self.state, &input);

        let width = self.state.viewport.width as u32;
        if self.canvas.width() != width {
            // Resizing the buffer resets context state
            self.canvas.set_width(width);
            self.ctx.set_image_smoothing_enabled(false);
            log::debug!("Header resized to {}x{}", width, self.canvas.height());
        }

        draw_scene(&mut self.ctx, &self.state, &self.settings);
    }

    /// Sound whatever the last input queued up
    fn flush_tones(&mut self) {
        let events = self.state.drain_events();
        let envs = envelopes(&events, &self.settings);
        self.synth.play_all(&envs);
    }
}

/// Interactive header mounted on a canvas
#[wasm_bindgen]
pub struct PixelHeader {
    mount: Rc<RefCell<Mount>>,
    window: Window,
    canvas: HtmlCanvasElement,
    frame_cb: FrameCallback,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    click: Closure<dyn FnMut(MouseEvent)>,
}

impl PixelHeader {
    /// Mount on the canvas with the given element id
    pub fn mount_by_id(id: &str, settings: Settings) -> HeaderResult<Self> {
        let window = web_sys::window().ok_or(HeaderError::NoWindow)?;
        let document = window.document().ok_or(HeaderError::NoDocument)?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| HeaderError::CanvasNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| HeaderError::NotACanvas(id.to_string()))?;
        Self::mount(canvas, settings)
    }

    /// Mount on a canvas and start the frame loop
    pub fn mount(canvas: HtmlCanvasElement, settings: Settings) -> HeaderResult<Self> {
        let window = web_sys::window().ok_or(HeaderError::NoWindow)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or(HeaderError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HeaderError::NoContext2d)?;

        let width = canvas
            .parent_element()
            .map(|p| p.client_width())
            .unwrap_or_else(|| canvas.client_width())
            .max(0) as u32;
        canvas.set_width(width);
        canvas.set_height(CANVAS_HEIGHT as u32);
        ctx.set_image_smoothing_enabled(false);

        let star_span = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(width as f64) as f32;
        let seed = js_sys::Date::now() as u64;
        let state = HeaderState::new(seed, Viewport::new(width as f32), star_span);
        log::info!("Pixel header mounted ({}px wide, seed {})", width, seed);

        let mount = Rc::new(RefCell::new(Mount {
            canvas: canvas.clone(),
            ctx,
            state,
            settings,
            synth: ToneSynth::new(),
            frame_loop: FrameLoop::new(),
        }));

        let keydown = {
            let mount = mount.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut m = mount.borrow_mut();
                if handle_key(&mut m.state, &event.key()) {
                    m.flush_tones();
                }
            })
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let click = {
            let mount = mount.clone();
            let canvas = canvas.clone();
            Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let Some(x) = click_to_canvas_x(
                    event.client_x() as f32,
                    rect.left() as f32,
                    rect.width() as f32,
                    canvas.width() as f32,
                ) else {
                    return;
                };
                let mut m = mount.borrow_mut();
                if handle_click(&mut m.state, x) > 0 {
                    m.flush_tones();
                }
            })
        };
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
        {
            let next = frame_cb.clone();
            let mount = mount.clone();
            let window = window.clone();
            *frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |_time: f64| {
                let mut m = mount.borrow_mut();
                if !m.frame_loop.begin_frame() {
                    return;
                }
                m.frame();
                if let Some(cb) = next.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        m.frame_loop.scheduled(id);
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let header = Self {
            mount,
            window,
            canvas,
            frame_cb,
            keydown,
            click,
        };
        header.request_first_frame()?;
        Ok(header)
    }

    fn request_first_frame(&self) -> HeaderResult<()> {
        let slot = self.frame_cb.borrow();
        let Some(cb) = slot.as_ref() else {
            return Ok(());
        };
        let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        self.mount.borrow_mut().frame_loop.scheduled(id);
        Ok(())
    }
}

#[wasm_bindgen]
impl PixelHeader {
    /// Mount on a canvas from JavaScript; `undefined` when the canvas is unusable
    #[wasm_bindgen(js_name = attach)]
    pub fn attach(canvas: HtmlCanvasElement) -> Option<PixelHeader> {
        match Self::mount(canvas, Settings::load()) {
            Ok(header) => Some(header),
            Err(e) => {
                log::warn!("Pixel header not mounted: {}", e);
                None
            }
        }
    }

    /// Stop the frame loop and remove the listeners. Safe to call twice.
    pub fn unmount(&mut self) {
        let (pending, frames) = {
            let mut m = self.mount.borrow_mut();
            if m.frame_loop.is_cancelled() {
                return;
            }
            (m.frame_loop.cancel(), m.frame_loop.frames())
        };
        if let Some(id) = pending {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .canvas
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
        // Breaks the closure's reference to itself
        self.frame_cb.borrow_mut().take();
        log::info!("Pixel header unmounted after {} frames", frames);
    }

    /// Trigger a musician programmatically (0-6)
    pub fn trigger(&self, index: usize) -> bool {
        let mut m = self.mount.borrow_mut();
        let fired = trigger_musician(&mut m.state, index);
        if fired {
            m.flush_tones();
        }
        fired
    }

    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&self, muted: bool) {
        let mut m = self.mount.borrow_mut();
        m.settings.muted = muted;
        m.settings.save();
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        let mut m = self.mount.borrow_mut();
        m.settings.master_volume = volume;
        m.settings = m.settings.clone().sanitize();
        m.settings.save();
    }

    #[wasm_bindgen(getter, js_name = fireIntensity)]
    pub fn fire_intensity(&self) -> f32 {
        self.mount.borrow().state.fire_intensity
    }
}

impl Drop for PixelHeader {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Fill the ambient field container and wire the sign-up anchors
pub fn decorate_page(document: &Document, settings: &Settings) -> HeaderResult<()> {
    let wired = site::wire_signup_links(document)?;
    log::info!("Wired {} sign-up links", wired);

    let (sparks, notes) = settings.effective_ambient_counts();
    if sparks + notes == 0 {
        return Ok(());
    }
    let Some(container) = document.get_element_by_id("ambient-field") else {
        log::debug!("No #ambient-field container, skipping ambient particles");
        return Ok(());
    };

    ambient::inject_keyframes(document)?;
    let mut rng = Pcg32::seed_from_u64(js_sys::Date::now() as u64);
    let mut particles = ambient::generate_field(FieldKind::Spark, sparks, &mut rng);
    particles.extend(ambient::generate_field(FieldKind::Note, notes, &mut rng));
    ambient::populate(document, &container, &particles)
}
