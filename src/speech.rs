/// Text-to-speech with fallback between the browser's speech synthesis and the
/// page-global ResponsiveVoice library.

use std::fmt;

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOrder {
    NativeFirst,
    RemoteFirst,
}

impl SpeechOrder {
    pub fn from_name(name: &str) -> Option<SpeechOrder> {
        match name {
            "native" => Some(SpeechOrder::NativeFirst),
            "remote" => Some(SpeechOrder::RemoteFirst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub lang: String,
    /// ResponsiveVoice speaker name.
    pub speaker: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Voice {
            lang: "ja-JP".to_string(),
            speaker: "Japanese Female".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechError {
    Backend { backend: &'static str, message: String },
    Unavailable,
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::Backend { backend, message } => write!(f, "{}: {}", backend, message),
            SpeechError::Unavailable => write!(f, "no speech backend could speak"),
        }
    }
}

impl std::error::Error for SpeechError {}

pub trait SpeechBackend {
    fn name(&self) -> &'static str;
    fn is_available(&self) -> bool;
    fn speak(&self, text: &str, voice: &Voice) -> Result<(), SpeechError>;
}

/// `window.speechSynthesis`
pub struct BrowserSpeech;

impl BrowserSpeech {
    fn synthesis() -> Option<web_sys::SpeechSynthesis> {
        web_sys::window()?.speech_synthesis().ok()
    }

    fn error(err: JsValue) -> SpeechError {
        SpeechError::Backend {
            backend: "speechSynthesis",
            message: format!("{:?}", err),
        }
    }
}

impl SpeechBackend for BrowserSpeech {
    fn name(&self) -> &'static str {
        "speechSynthesis"
    }

    fn is_available(&self) -> bool {
        Self::synthesis().is_some()
    }

    fn speak(&self, text: &str, voice: &Voice) -> Result<(), SpeechError> {
        let synthesis = Self::synthesis().ok_or(SpeechError::Unavailable)?;
        let utterance = web_sys::SpeechSynthesisUtterance::new_with_text(text).map_err(Self::error)?;
        utterance.set_lang(&voice.lang);
        utterance.set_rate(voice.rate);
        utterance.set_pitch(voice.pitch);
        synthesis.speak(&utterance);
        Ok(())
    }
}

/// `window.responsiveVoice`, loaded by the page from responsivevoice.org.
pub struct ResponsiveVoice;

impl ResponsiveVoice {
    fn library() -> Option<JsValue> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str("responsiveVoice"))
            .ok()
            .filter(|value| value.is_object())
    }

    fn error(err: JsValue) -> SpeechError {
        SpeechError::Backend {
            backend: "responsiveVoice",
            message: format!("{:?}", err),
        }
    }
}

impl SpeechBackend for ResponsiveVoice {
    fn name(&self) -> &'static str {
        "responsiveVoice"
    }

    fn is_available(&self) -> bool {
        Self::library().is_some()
    }

    fn speak(&self, text: &str, voice: &Voice) -> Result<(), SpeechError> {
        let library = Self::library().ok_or(SpeechError::Unavailable)?;
        let speak = js_sys::Reflect::get(&library, &JsValue::from_str("speak"))
            .map_err(Self::error)?
            .dyn_into::<js_sys::Function>()
            .map_err(Self::error)?;
        speak
            .call2(
                &library,
                &JsValue::from_str(text),
                &JsValue::from_str(&voice.speaker),
            )
            .map_err(Self::error)?;
        Ok(())
    }
}

/// Speaks `text` with the first backend that is available and succeeds.
/// Returns the name of that backend.
pub fn speak_with(
    backends: &[&dyn SpeechBackend],
    text: &str,
    voice: &Voice,
) -> Result<&'static str, SpeechError> {
    for backend in backends {
        if !backend.is_available() {
            debug!("Speech backend {} is not available", backend.name());
            continue;
        }
        match backend.speak(text, voice) {
            Ok(()) => return Ok(backend.name()),
            Err(e) => warn!("Speech synthesis error: {}", e),
        }
    }
    Err(SpeechError::Unavailable)
}

pub fn speak(text: &str, order: SpeechOrder) -> Result<&'static str, SpeechError> {
    let native = BrowserSpeech;
    let remote = ResponsiveVoice;
    let backends: [&dyn SpeechBackend; 2] = match order {
        SpeechOrder::NativeFirst => [&native, &remote],
        SpeechOrder::RemoteFirst => [&remote, &native],
    };
    speak_with(&backends, text, &Voice::default())
}
