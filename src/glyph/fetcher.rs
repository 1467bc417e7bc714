/// Glyph Fetcher
///
/// Retrieves the KanjiVG document of a character. Failures never leave this
/// module as errors: callers get `None` and the cause goes to the log.

use std::fmt;

use futures::future::{FutureExt, LocalBoxFuture};
use log::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::key::GlyphKey;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    NotFound { status: u16 },
    Transport(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { status } => write!(f, "Kanji not found (HTTP {})", status),
            FetchError::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// A character-keyed collection of glyph documents.
pub trait GlyphSource {
    fn read<'a>(&'a self, key: &'a GlyphKey) -> LocalBoxFuture<'a, Result<String, FetchError>>;
}

/// Glyph documents served next to the application, one `<key>.svg` per character.
pub struct HttpGlyphSource {
    base_url: String,
}

impl HttpGlyphSource {
    pub fn new(base_path: &str, glyph_directory: &str) -> Self {
        HttpGlyphSource {
            base_url: format!(
                "{}/{}",
                base_path.trim_end_matches('/'),
                glyph_directory.trim_matches('/')
            ),
        }
    }

    pub fn from_config() -> Self {
        crate::config::with_config(|config| {
            HttpGlyphSource::new(&config.base_path, &config.glyph_directory)
        })
    }

    pub fn url(&self, key: &GlyphKey) -> String {
        format!("{}/{}.svg", self.base_url, key)
    }
}

impl GlyphSource for HttpGlyphSource {
    fn read<'a>(&'a self, key: &'a GlyphKey) -> LocalBoxFuture<'a, Result<String, FetchError>> {
        let url = self.url(key);
        async move { fetch_text(&url).await }.boxed_local()
    }
}

fn transport_error(err: JsValue) -> FetchError {
    FetchError::Transport(format!("{:?}", err))
}

async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::Transport("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(transport_error)?;
    let response = response
        .dyn_into::<web_sys::Response>()
        .map_err(transport_error)?;

    if !response.ok() {
        return Err(FetchError::NotFound {
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    text.as_string()
        .ok_or_else(|| FetchError::Transport("response body is not text".to_string()))
}

pub async fn fetch_glyph<S: GlyphSource + ?Sized>(
    source: &S,
    key: &GlyphKey,
) -> Result<String, FetchError> {
    debug!("Fetching glyph {}", key);
    source.read(key).await
}

/// Markup of `character`'s glyph, or `None` when it cannot be retrieved.
pub async fn load_glyph_markup<S: GlyphSource + ?Sized>(source: &S, character: char) -> Option<String> {
    let key = GlyphKey::from_char(character);
    match fetch_glyph(source, &key).await {
        Ok(markup) => Some(markup),
        Err(e) => {
            error!("Failed to load KanjiVG data for {}: {}", character, e);
            None
        }
    }
}
