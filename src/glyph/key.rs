use std::fmt;

/// Storage key of a glyph document: the code point in lowercase hex,
/// zero-padded to five digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphKey(String);

impl GlyphKey {
    pub fn from_char(character: char) -> GlyphKey {
        GlyphKey(format!("{:05x}", character as u32))
    }

    /// Key of the first code point in `text`.
    pub fn from_str_first(text: &str) -> Option<GlyphKey> {
        text.chars().next().map(GlyphKey::from_char)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
