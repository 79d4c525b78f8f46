//! Immutable source text with its content hash

use crate::hash::ContentHash;

/// Full contents of one file at the start of processing
///
/// The hash is computed once on construction and identifies this exact
/// byte sequence for the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    hash: ContentHash,
}

impl SourceText {
    /// Wrap text, computing its hash
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let hash = ContentHash::compute(text.as_bytes());
        Self { text, hash }
    }

    /// Source text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Content hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// Length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Unwrap into the owned string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Byte offset of the start of the line containing `offset`
    #[must_use]
    pub fn line_start(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.text[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Leading whitespace of the line containing `offset`, provided nothing
    /// but whitespace precedes `offset` on that line
    ///
    /// Returns `None` when `offset` is preceded by code on its line.
    #[must_use]
    pub fn indent_before(&self, offset: usize) -> Option<&str> {
        let offset = offset.min(self.text.len());
        let prefix = self.text.get(self.line_start(offset)..offset)?;
        prefix
            .chars()
            .all(|c| c == ' ' || c == '\t')
            .then_some(prefix)
    }

    /// Line terminator used by the line containing `offset`
    ///
    /// Falls back to the previous line's terminator on a final unterminated
    /// line, and to `"\n"` for single-line text.
    #[must_use]
    pub fn newline_at(&self, offset: usize) -> &'static str {
        let offset = offset.min(self.text.len());
        let bytes = self.text.as_bytes();
        let lf = self
            .text
            .get(offset..)
            .and_then(|rest| rest.find('\n'))
            .map(|i| offset + i)
            .or_else(|| self.text.get(..offset).and_then(|head| head.rfind('\n')));
        match lf {
            Some(i) if i > 0 && bytes[i - 1] == b'\r' => "\r\n",
            _ => "\n",
        }
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
