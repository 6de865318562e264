//! Audio system using Web Audio API
//!
//! Chiptune blips - one square-wave oscillator per note, no sample files.
//! One audio context serves the whole page. It is created on the first tone,
//! inside the user gesture that caused it, and reused by every mount.

use crate::consts::{TONE_DURATION, TONE_FLOOR_GAIN, TONE_PEAK_GAIN};
use crate::settings::Settings;
use crate::sim::HeaderEvent;

/// Attack-then-exponential-decay shape of a single note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    /// Oscillator frequency in Hz
    pub frequency: f32,
    /// Gain at note start
    pub peak: f32,
    /// Gain reached at `duration`
    pub floor: f32,
    /// Seconds until the oscillator stops
    pub duration: f64,
}

impl ToneEnvelope {
    /// Envelope for a note at the visitor's volume, `None` when silent
    pub fn for_note(frequency: f32, settings: &Settings) -> Option<Self> {
        let peak = settings.tone_gain();
        if peak <= 0.0 || frequency <= 0.0 {
            return None;
        }
        Some(Self {
            frequency,
            peak,
            // Keep the same decay depth at any volume
            floor: peak * (TONE_FLOOR_GAIN / TONE_PEAK_GAIN),
            duration: TONE_DURATION,
        })
    }

    /// Gain `t` seconds after the start, following the exponential ramp
    pub fn gain_at(&self, t: f64) -> f32 {
        if t <= 0.0 {
            return self.peak;
        }
        if t >= self.duration {
            return self.floor;
        }
        let progress = (t / self.duration) as f32;
        self.peak * (self.floor / self.peak).powf(progress)
    }
}

/// Envelopes for every tone request in `events`
pub fn envelopes(events: &[HeaderEvent], settings: &Settings) -> Vec<ToneEnvelope> {
    events
        .iter()
        .filter_map(|event| match *event {
            HeaderEvent::Tone { frequency, .. } => ToneEnvelope::for_note(frequency, settings),
        })
        .collect()
}

/// Create-once holder for a handle that every user shares.
///
/// A failed creation is remembered so later callers don't retry it.
#[derive(Debug)]
pub struct SharedSlot<T> {
    value: Option<T>,
    failed: bool,
}

impl<T> Default for SharedSlot<T> {
    fn default() -> Self {
        Self {
            value: None,
            failed: false,
        }
    }
}

impl<T: Clone> SharedSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, running `create` only if nothing was made yet
    pub fn get_or_create(&mut self, create: impl FnOnce() -> Option<T>) -> Option<T> {
        if self.value.is_none() && !self.failed {
            self.value = create();
            self.failed = self.value.is_none();
        }
        self.value.clone()
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::ToneSynth;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{SharedSlot, ToneEnvelope};

    thread_local! {
        static CONTEXT: RefCell<SharedSlot<AudioContext>> = RefCell::new(SharedSlot::new());
    }

    /// Tone generator on top of the page-wide audio context
    #[derive(Debug, Default)]
    pub struct ToneSynth;

    impl ToneSynth {
        pub fn new() -> Self {
            Self
        }

        /// Get the shared context, creating it on first use
        fn context() -> Option<AudioContext> {
            CONTEXT.with_borrow_mut(|slot| {
                slot.get_or_create(|| match AudioContext::new() {
                    Ok(ctx) => {
                        log::info!("AudioContext created");
                        Some(ctx)
                    }
                    Err(e) => {
                        log::warn!("Failed to create AudioContext - audio disabled: {:?}", e);
                        None
                    }
                })
            })
        }

        /// Resume a context the autoplay policy left suspended
        fn wake(ctx: &AudioContext) {
            if ctx.state() != AudioContextState::Suspended {
                return;
            }
            match ctx.resume() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("AudioContext resume rejected: {:?}", e);
                    }
                }),
                Err(e) => log::debug!("AudioContext resume failed: {:?}", e),
            }
        }

        /// Play one note; failures are silent
        pub fn play(&self, env: &ToneEnvelope) {
            let Some(ctx) = Self::context() else { return };
            Self::wake(&ctx);
            if Self::schedule(&ctx, env).is_none() {
                log::debug!("Tone at {} Hz skipped", env.frequency);
            }
        }

        pub fn play_all(&self, envs: &[ToneEnvelope]) {
            for env in envs {
                self.play(env);
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Square);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn schedule(ctx: &AudioContext, env: &ToneEnvelope) -> Option<()> {
            let (osc, gain) = Self::create_osc(ctx, env.frequency)?;
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(env.frequency, t).ok()?;
            gain.gain().set_value_at_time(env.peak, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(env.floor, t + env.duration)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + env.duration).ok()?;
            Some(())
        }
    }
}
