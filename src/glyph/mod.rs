/// Glyph stroke pipeline
///
/// fetch -> extract -> interpret -> normalize. Each character is handled on
/// its own; nothing is shared between requests.

pub mod extractor;
pub mod fetcher;
pub mod key;
pub mod normalizer;
pub mod types;

use std::fmt;

use futures::future::join_all;
use log::{debug, error};

use crate::path::interpreter::interpret;
use crate::path::policy::{ParsePolicy, PathError};

use extractor::extract_strokes;
use fetcher::{load_glyph_markup, GlyphSource};
use normalizer::{normalize, GLYPH_HEIGHT, GLYPH_WIDTH};
use types::StrokeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum GlyphError {
    Markup(String),
    MissingStrokeIndex(String),
    Path { id: String, error: PathError },
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::Markup(msg) => write!(f, "malformed glyph markup: {}", msg),
            GlyphError::MissingStrokeIndex(id) => write!(f, "stroke {} has no stroke number", id),
            GlyphError::Path { id, error } => write!(f, "stroke {}: {}", id, error),
        }
    }
}

impl std::error::Error for GlyphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlyphError::Path { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    pub policy: ParsePolicy,
    pub width: f64,
    pub height: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            policy: ParsePolicy::default(),
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
        }
    }
}

/// Strokes of a glyph document in writing order, scaled into the unit square.
/// Stroke elements without path data are skipped.
pub fn parse_glyph(markup: &str, options: &ParseOptions) -> Result<StrokeSet, GlyphError> {
    let mut strokes = StrokeSet::new();

    for stroke in extract_strokes(markup, options.policy)? {
        if stroke.data.is_empty() {
            debug!("Skipping stroke {} without path data", stroke.id);
            continue;
        }
        let points = interpret(&stroke.data, options.policy).map_err(|error| GlyphError::Path {
            id: stroke.id.clone(),
            error,
        })?;
        strokes.push(normalize(&points, options.width, options.height));
    }

    Ok(strokes)
}

pub async fn load_strokes<S: GlyphSource + ?Sized>(
    source: &S,
    character: char,
    options: &ParseOptions,
) -> Option<StrokeSet> {
    let markup = load_glyph_markup(source, character).await?;
    match parse_glyph(&markup, options) {
        Ok(strokes) => Some(strokes),
        Err(e) => {
            error!("Failed to parse KanjiVG data for {}: {}", character, e);
            None
        }
    }
}

/// Loads every character of `text` concurrently. Results keep input order.
pub async fn load_strokes_many<S: GlyphSource + ?Sized>(
    source: &S,
    text: &str,
    options: &ParseOptions,
) -> Vec<(char, Option<StrokeSet>)> {
    let requests = text.chars().map(|character| async move {
        (character, load_strokes(source, character, options).await)
    });
    join_all(requests).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::fetcher::tests::MemorySource;
    use super::types::Point;
    use super::*;

    const THREE_STROKES: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="109" height="109" viewBox="0 0 109 109">
<g id="kvg:StrokePaths_04e09">
<path id="kvg:04e09-s2" d="M0,54.5 L109,54.5"/>
<path id="kvg:04e09-s1" d="M0,0 L109,0"/>
<path id="kvg:04e09-s3" d="M0,109 L109,109"/>
</g>
</svg>"#;

    #[test]
    fn test_strokes_in_writing_order() {
        let strokes = parse_glyph(THREE_STROKES, &ParseOptions::default()).unwrap();
        assert_eq!(
            strokes,
            vec![
                vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)],
                vec![Point::new(0.0, 0.5), Point::new(1.0, 0.5)],
                vec![Point::new(0.0, 1.0), Point::new(1.0, 1.0)],
            ]
        );
    }

    #[test]
    fn test_curves_stay_in_unit_square() {
        let markup = r#"<svg><path id="kvg:06c34-s1" d="M54.5,15.25c1.12,0.62,1.98,2.53,1.98,4.27c0,15.7-0.02,51.71-0.02,55.34"/></svg>"#;
        let strokes = parse_glyph(markup, &ParseOptions::default()).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].len(), 1 + 2 * 31);
        assert!(strokes[0]
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }

    #[test]
    fn test_skips_strokes_without_data() {
        let markup = r#"<svg><path id="a-s1" d=""/><path id="a-s2" d="M10.9,10.9"/></svg>"#;
        let strokes = parse_glyph(markup, &ParseOptions::default()).unwrap();
        assert_eq!(strokes.len(), 1);
        assert!((strokes[0][0].x - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_strict_reports_stroke() {
        let markup = r#"<svg><path id="a-s1" d="M1,1 A1,1 0 0 1 2,2"/></svg>"#;
        let options = ParseOptions {
            policy: ParsePolicy::Strict,
            ..ParseOptions::default()
        };
        assert_eq!(
            parse_glyph(markup, &options),
            Err(GlyphError::Path {
                id: "a-s1".to_string(),
                error: PathError::UnknownCommand('A'),
            })
        );
    }

    #[test]
    fn test_load_strokes() {
        let source = MemorySource::new(&[('三', THREE_STROKES)]);
        let options = ParseOptions::default();
        assert_eq!(block_on(load_strokes(&source, '三', &options)).map(|s| s.len()), Some(3));
        assert_eq!(block_on(load_strokes(&source, '四', &options)), None);
    }

    #[test]
    fn test_load_strokes_many_keeps_order() {
        let source = MemorySource::new(&[('三', THREE_STROKES)]);
        let results = block_on(load_strokes_many(&source, "四三", &ParseOptions::default()));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, '四');
        assert!(results[0].1.is_none());
        assert_eq!(results[1].0, '三');
        assert_eq!(results[1].1.as_ref().map(|s| s.len()), Some(3));
    }
}
