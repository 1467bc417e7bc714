/// Stroke Extractor
///
/// Pulls the stroke paths out of a KanjiVG document and orders them by the
/// stroke number embedded in each path id (`kvg:06c34-s1`, `kvg:06c34-s2`, ...).

use std::borrow::Cow;

use itertools::Itertools;
use log::{debug, warn};
use xml::reader::{EventReader, XmlEvent};

use crate::path::policy::ParsePolicy;

use super::types::StrokePath;
use super::GlyphError;

const STROKE_MARKER: &str = "-s";

pub fn extract_strokes(markup: &str, policy: ParsePolicy) -> Result<Vec<StrokePath>, GlyphError> {
    let prepared = bind_fixed_namespaces(markup);
    let reader = EventReader::new(prepared.as_bytes());
    let mut strokes = Vec::new();

    for event in reader {
        match event {
            Ok(XmlEvent::StartElement { name, attributes, .. }) if name.local_name == "path" => {
                let id = match attributes
                    .iter()
                    .find(|attr| attr.name.prefix.is_none() && attr.name.local_name == "id")
                {
                    Some(attr) => attr.value.clone(),
                    None => continue,
                };
                if !id.contains(STROKE_MARKER) {
                    continue;
                }

                let index = policy
                    .stroke_index(parse_stroke_index(&id))
                    .ok_or_else(|| GlyphError::MissingStrokeIndex(id.clone()))?;
                let data = attributes
                    .iter()
                    .find(|attr| attr.name.prefix.is_none() && attr.name.local_name == "d")
                    .map(|attr| attr.value.clone())
                    .unwrap_or_default();

                strokes.push(StrokePath { index, id, data });
            }
            Ok(_) => {}
            Err(e) => {
                if policy.is_strict() {
                    return Err(GlyphError::Markup(e.to_string()));
                }
                warn!("Malformed glyph markup, keeping {} strokes: {}", strokes.len(), e);
                break;
            }
        }
    }

    debug!("Extracted {} stroke paths", strokes.len());
    Ok(strokes
        .into_iter()
        .sorted_by_key(|stroke| stroke.index)
        .collect())
}

/// Number following the first `-s<digits>` in an element id. Numbers too large
/// for `u32` saturate so the stroke still sorts last.
pub fn parse_stroke_index(id: &str) -> Option<u32> {
    id.match_indices(STROKE_MARKER)
        .map(|(pos, _)| &id[pos + STROKE_MARKER.len()..])
        .map(|rest| {
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .find(|digits| !digits.is_empty())
        .map(|digits| digits.parse().unwrap_or(u32::MAX))
}

/// KanjiVG binds its `kvg:` prefix only through `#FIXED` attribute defaults in
/// the internal DTD subset, which a namespace-aware reader never applies.
/// This drops the DOCTYPE and declares those namespaces on the root element.
fn bind_fixed_namespaces(markup: &str) -> Cow<'_, str> {
    let prolog = match scan_prolog(markup) {
        Some(prolog) => prolog,
        None => return Cow::Borrowed(markup),
    };
    let (doctype_start, doctype_end) = match prolog.doctype {
        Some(range) => range,
        None => return Cow::Borrowed(markup),
    };

    let doctype = &markup[doctype_start..doctype_end];
    let root_tag = &markup[prolog.root_start..prolog.root_tag_end];
    let declarations: String = fixed_namespace_declarations(doctype)
        .into_iter()
        .filter(|(name, _)| !root_tag.contains(&format!("{}=", name)))
        .map(|(name, value)| format!(" {}=\"{}\"", name, value))
        .collect();

    let mut out = String::with_capacity(markup.len() + declarations.len());
    out.push_str(&markup[..doctype_start]);
    out.push_str(&markup[doctype_end..prolog.root_name_end]);
    out.push_str(&declarations);
    out.push_str(&markup[prolog.root_name_end..]);
    Cow::Owned(out)
}

struct Prolog {
    doctype: Option<(usize, usize)>,
    root_start: usize,
    root_name_end: usize,
    root_tag_end: usize,
}

fn scan_prolog(markup: &str) -> Option<Prolog> {
    let mut pos = 0;
    let mut doctype = None;

    loop {
        let rest = &markup[pos..];
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        pos += rest.len() - trimmed.len();

        if trimmed.starts_with("<?") {
            pos += trimmed.find("?>")? + 2;
        } else if trimmed.starts_with("<!--") {
            pos += trimmed.find("-->")? + 3;
        } else if trimmed.starts_with("<!DOCTYPE") {
            let len = declaration_len(trimmed)?;
            doctype = Some((pos, pos + len));
            pos += len;
        } else if trimmed.starts_with('<') {
            let name_len = trimmed[1..]
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(trimmed.len() - 1);
            return Some(Prolog {
                doctype,
                root_start: pos,
                root_name_end: pos + 1 + name_len,
                root_tag_end: pos + declaration_len(trimmed)?,
            });
        } else {
            return None;
        }
    }
}

/// Length of a markup declaration or tag up to its closing `>`, skipping
/// quoted values and bracketed internal subsets.
fn declaration_len(text: &str) -> Option<usize> {
    let mut quote = None;
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '>') if depth == 0 => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// `xmlns:*` attributes declared `#FIXED` in `<!ATTLIST ...>` declarations,
/// first declaration per prefix wins.
fn fixed_namespace_declarations(doctype: &str) -> Vec<(String, String)> {
    let words: Vec<&str> = doctype.split_whitespace().collect();
    let mut found: Vec<(String, String)> = Vec::new();

    for window in words.windows(4) {
        let (name, fixed, value) = (window[0], window[2], window[3]);
        if !name.starts_with("xmlns:") || fixed != "#FIXED" {
            continue;
        }
        let value = value.trim_end_matches(|c: char| c == '>' || c == ']');
        let unquoted = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')));
        if let Some(uri) = unquoted {
            if !found.iter().any(|(existing, _)| existing == name) {
                found.push((name.to_string(), uri.to_string()));
            }
        }
    }

    found
}
