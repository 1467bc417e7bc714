pub mod config;
pub mod glyph;
pub mod js_api;
pub mod path;
pub mod speech;
pub mod utils;

use log::warn;
use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

use config::{update_config, with_config};
use glyph::fetcher::{load_glyph_markup, HttpGlyphSource};
use glyph::key::GlyphKey;
use glyph::{load_strokes, load_strokes_many, parse_glyph};
use js_api::ToJsValue;
use path::length::{estimate_length, GeometricLength, NativeLength, PathLengthProvider};
use path::policy::ParsePolicy;
use speech::SpeechOrder;

#[wasm_bindgen]
pub fn set_base_path(path: String) {
    update_config(|config| config.base_path = path);
}

#[wasm_bindgen]
pub fn set_glyph_directory(directory: String) {
    update_config(|config| config.glyph_directory = directory);
}

#[wasm_bindgen]
pub fn set_strict_parsing(strict: bool) {
    let policy = if strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };
    update_config(|config| config.parse_policy = policy);
}

/// "native" tries `speechSynthesis` first, "remote" tries ResponsiveVoice first.
#[wasm_bindgen]
pub fn set_speech_preference(preference: String) {
    match SpeechOrder::from_name(&preference) {
        Some(order) => update_config(|config| config.speech_order = order),
        None => warn!("Unknown speech preference {:?}", preference),
    }
}

#[wasm_bindgen]
pub fn glyph_key(character: &str) -> Option<String> {
    GlyphKey::from_str_first(character).map(|key| key.to_string())
}

/// Raw KanjiVG markup of the first character, or null.
#[wasm_bindgen]
pub async fn load_kanji_svg(character: String) -> JsValue {
    let character = match character.chars().next() {
        Some(c) => c,
        None => return JsValue::NULL,
    };
    let source = HttpGlyphSource::from_config();
    load_glyph_markup(&source, character).await.to_js_value()
}

/// Normalized strokes of the first character, or null.
#[wasm_bindgen]
pub async fn load_kanji_data(character: String) -> JsValue {
    let character = match character.chars().next() {
        Some(c) => c,
        None => return JsValue::NULL,
    };
    let source = HttpGlyphSource::from_config();
    let options = with_config(|config| config.parse_options());
    load_strokes(&source, character, &options).await.to_js_value()
}

/// Map of every character in `characters` to its strokes, or null.
#[wasm_bindgen]
pub async fn load_kanji_batch(characters: String) -> js_sys::Map {
    let source = HttpGlyphSource::from_config();
    let options = with_config(|config| config.parse_options());
    let map = js_sys::Map::new();
    for (character, strokes) in load_strokes_many(&source, &characters, &options).await {
        map.set(&JsValue::from_str(&character.to_string()), &strokes.to_js_value());
    }
    map
}

#[wasm_bindgen]
pub fn parse_kanji_svg(svg: &str) -> JsValue {
    let options = with_config(|config| config.parse_options());
    match parse_glyph(svg, &options) {
        Ok(strokes) => strokes.to_js_value(),
        Err(e) => {
            warn!("Failed to parse KanjiVG data: {}", e);
            JsValue::NULL
        }
    }
}

#[wasm_bindgen]
pub fn get_path_length(d: Option<String>) -> f64 {
    let provider: &dyn PathLengthProvider = if web_sys::window().is_some() {
        &NativeLength
    } else {
        &GeometricLength
    };
    estimate_length(d.as_deref(), provider)
}

#[wasm_bindgen]
pub fn speak(text: String) {
    let order = with_config(|config| config.speech_order);
    if let Err(e) = speech::speak(&text, order) {
        warn!("Failed to speak {:?}: {}", text, e);
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logging();
}
