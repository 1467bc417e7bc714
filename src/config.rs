use std::cell::RefCell;

use crate::glyph::normalizer::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::glyph::ParseOptions;
use crate::path::policy::ParsePolicy;
use crate::speech::SpeechOrder;

pub const DEFAULT_GLYPH_DIRECTORY: &str = "kanjivg/kanjivg-master/kanji";

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphConfig {
    /// Prefix the application is served under, e.g. `/japanese-learn`.
    pub base_path: String,
    pub glyph_directory: String,
    pub glyph_width: f64,
    pub glyph_height: f64,
    pub parse_policy: ParsePolicy,
    pub speech_order: SpeechOrder,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        GlyphConfig {
            base_path: String::new(),
            glyph_directory: DEFAULT_GLYPH_DIRECTORY.to_string(),
            glyph_width: GLYPH_WIDTH,
            glyph_height: GLYPH_HEIGHT,
            parse_policy: ParsePolicy::default(),
            speech_order: SpeechOrder::NativeFirst,
        }
    }
}

impl GlyphConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            policy: self.parse_policy,
            width: self.glyph_width,
            height: self.glyph_height,
        }
    }
}

thread_local!(static CONFIG: RefCell<GlyphConfig> = RefCell::new(GlyphConfig::default()));

pub fn with_config<R>(f: impl FnOnce(&GlyphConfig) -> R) -> R {
    CONFIG.with(|config| f(&config.borrow()))
}

pub fn update_config(f: impl FnOnce(&mut GlyphConfig)) {
    CONFIG.with(|config| f(&mut config.borrow_mut()))
}
