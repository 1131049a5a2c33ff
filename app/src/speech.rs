//! Browser speech capability adapters
//!
//! Wraps the speech-recognition and speech-synthesis engines behind small
//! owned handles. When an engine is missing, the constructor returns `None`
//! and the dependent controls are never rendered.

use dioxus::prelude::*;
use dioxus_logger::tracing::error;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{SpeechRecognition, SpeechSynthesis, SpeechSynthesisUtterance};

use studyspark_types::{StatusTone, VoiceEvent, VoicePhase};

/// Inline status line next to the voice trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoiceStatus {
    pub text: String,
    pub tone: StatusTone,
}

impl VoiceStatus {
    pub fn class(&self) -> &'static str {
        match self.tone {
            StatusTone::Neutral => "voice-status",
            StatusTone::Active => "voice-status listening",
            StatusTone::Error => "voice-status error",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Speech Input (recognition)
// ─────────────────────────────────────────────────────────────────────────────

/// One recognition engine configured for single-shot English capture. The
/// engine handle and its callbacks live here for the adapter's lifetime,
/// not in module globals.
pub struct SpeechInput {
    engine: SpeechRecognition,
    phase: Signal<VoicePhase>,
    _on_start: Closure<dyn FnMut(JsValue)>,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

impl SpeechInput {
    /// Returns `None` when the host exposes no recognition engine, prefixed
    /// or not.
    pub fn new(
        phase: Signal<VoicePhase>,
        mut question: Signal<String>,
        status: Signal<VoiceStatus>,
    ) -> Option<Self> {
        let engine = new_engine()?;
        engine.set_continuous(false);
        engine.set_interim_results(false);
        engine.set_lang("en-US");

        let on_start: Closure<dyn FnMut(JsValue)> = Closure::new(move |_: JsValue| {
            apply_event(phase, status, &VoiceEvent::Started);
        });

        let on_result: Closure<dyn FnMut(JsValue)> = Closure::new(move |event: JsValue| {
            let transcript = extract_transcript(&event).unwrap_or_default();
            question.set(transcript.clone());
            apply_event(phase, status, &VoiceEvent::Result { transcript });
        });

        let on_error: Closure<dyn FnMut(JsValue)> = Closure::new(move |event: JsValue| {
            let message = js_sys::Reflect::get(&event, &JsValue::from_str("error"))
                .ok()
                .and_then(|e| e.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            apply_event(phase, status, &VoiceEvent::Error { message });
        });

        let on_end: Closure<dyn FnMut(JsValue)> = Closure::new(move |_: JsValue| {
            apply_event(phase, status, &VoiceEvent::Ended);
        });

        engine.set_onstart(Some(on_start.as_ref().unchecked_ref()));
        engine.set_onresult(Some(on_result.as_ref().unchecked_ref()));
        engine.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        engine.set_onend(Some(on_end.as_ref().unchecked_ref()));

        Some(Self {
            engine,
            phase,
            _on_start: on_start,
            _on_result: on_result,
            _on_error: on_error,
            _on_end: on_end,
        })
    }

    /// Start one capture session. A throwing engine is logged and swallowed;
    /// the listening transition itself arrives through the start callback.
    pub fn start(&self) {
        if self.phase.peek().is_listening() {
            return;
        }
        if let Err(err) = self.engine.start() {
            error!("failed to start speech recognition: {err:?}");
        }
    }
}

/// Advance the phase machine and refresh the status line for one engine
/// callback.
fn apply_event(mut phase: Signal<VoicePhase>, mut status: Signal<VoiceStatus>, event: &VoiceEvent) {
    let next = phase.peek().on_event(event);
    phase.set(next);
    if let Some((text, tone)) = event.status() {
        status.set(VoiceStatus { text, tone });
    }
}

/// Construct the engine, falling back to the `webkit`-prefixed constructor
/// Chrome ships.
fn new_engine() -> Option<SpeechRecognition> {
    if let Ok(engine) = SpeechRecognition::new() {
        return Some(engine);
    }
    let window = web_sys::window()?;
    let ctor: js_sys::Function =
        js_sys::Reflect::get(&window, &JsValue::from_str("webkitSpeechRecognition"))
            .ok()?
            .dyn_into()
            .ok()?;
    let engine = js_sys::Reflect::construct(&ctor, &js_sys::Array::new()).ok()?;
    Some(engine.unchecked_into())
}

/// Pull `event.results[0][0].transcript` out of a recognition result event.
fn extract_transcript(event: &JsValue) -> Option<String> {
    let results = js_sys::Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let first = js_sys::Reflect::get_u32(&results, 0).ok()?;
    let alternative = js_sys::Reflect::get_u32(&first, 0).ok()?;
    js_sys::Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Speech Output (synthesis)
// ─────────────────────────────────────────────────────────────────────────────

/// Text-to-speech playback of the rendered lesson. At most one utterance is
/// speaking; replay cancels the previous one first.
#[derive(Clone)]
pub struct SpeechOutput {
    synth: SpeechSynthesis,
}

impl SpeechOutput {
    /// Returns `None` when the host has no synthesis engine.
    pub fn new() -> Option<Self> {
        let synth = web_sys::window()?.speech_synthesis().ok()?;
        Some(Self { synth })
    }

    /// Speak the given plain text at fixed rate and pitch.
    pub fn speak(&self, text: &str) {
        if self.synth.speaking() {
            self.synth.cancel();
        }
        match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => {
                utterance.set_rate(1.0);
                utterance.set_pitch(1.0);
                self.synth.speak(&utterance);
            }
            Err(err) => error!("failed to build utterance: {err:?}"),
        }
    }

    /// Toggle between paused and resumed; no-op while nothing is speaking.
    pub fn toggle_pause(&self) {
        if !self.synth.speaking() {
            return;
        }
        if self.synth.paused() {
            self.synth.resume();
        } else {
            self.synth.pause();
        }
    }
}
