//! Edit plans for source transformations
//!
//! Rules never splice strings directly. They describe insertions anchored on
//! syntax-node byte offsets and collect them into an [`EditPlan`], which is
//! applied in one pass against the exact source it was planned for.

use tci_source::{ContentHash, SourceText};

/// Insertion of text at a byte offset of the base source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    offset: usize,
    text: String,
}

impl TextEdit {
    /// Insert `text` before the byte at `offset`
    #[inline]
    #[must_use]
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }

    /// Byte offset in the base source
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Inserted text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered insertions planned against one source text
///
/// # Invariants
/// - `base_hash` is the hash of the source every offset refers to
/// - insertions at the same offset are applied in the order they were added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    base_hash: ContentHash,
    edits: Vec<TextEdit>,
}

impl EditPlan {
    /// Create an empty plan for `base`
    #[inline]
    #[must_use]
    pub fn new(base: &SourceText) -> Self {
        Self {
            base_hash: base.hash(),
            edits: Vec::new(),
        }
    }

    /// Queue an insertion
    #[inline]
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.edits.push(TextEdit::insert(offset, text));
    }

    /// Hash of the source this plan targets
    #[inline]
    #[must_use]
    pub fn base_hash(&self) -> &ContentHash {
        &self.base_hash
    }

    /// Planned insertions, in the order they were added
    #[inline]
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Number of insertions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Check if the plan changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Verify plan can apply to source
    ///
    /// # Errors
    /// Returns error if the source hash differs from the planned base
    pub fn validate_base(&self, source: &SourceText) -> Result<(), EditError> {
        let actual = source.hash();
        if self.base_hash != actual {
            return Err(EditError::BaseMismatch {
                expected: self.base_hash,
                actual,
            });
        }
        Ok(())
    }

    /// Apply every insertion, producing new source text
    ///
    /// # Errors
    /// - `EditError::BaseMismatch` if `source` is not the planned base
    /// - `EditError::OutOfBounds` if an offset lies past the end
    /// - `EditError::NotCharBoundary` if an offset splits a UTF-8 sequence
    pub fn apply(&self, source: &SourceText) -> Result<SourceText, EditError> {
        self.validate_base(source)?;
        let text = source.as_str();

        let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
        // stable: same-offset insertions keep their planned order
        ordered.sort_by_key(|e| e.offset);

        for edit in &ordered {
            if edit.offset > text.len() {
                return Err(EditError::OutOfBounds {
                    offset: edit.offset,
                    len: text.len(),
                });
            }
            if !text.is_char_boundary(edit.offset) {
                return Err(EditError::NotCharBoundary(edit.offset));
            }
        }

        let added: usize = ordered.iter().map(|e| e.text.len()).sum();
        let mut out = String::with_capacity(text.len() + added);
        let mut cursor = 0;
        for edit in ordered {
            out.push_str(&text[cursor..edit.offset]);
            out.push_str(&edit.text);
            cursor = edit.offset;
        }
        out.push_str(&text[cursor..]);

        Ok(SourceText::new(out))
    }
}

/// Errors applying an edit plan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Base hash mismatch (source changed since planning)
    #[error("base hash mismatch: expected {}, got {}", .expected.short(), .actual.short())]
    BaseMismatch {
        /// Hash the plan was built against
        expected: ContentHash,
        /// Hash of the source offered for application
        actual: ContentHash,
    },

    /// Offset beyond the end of the source
    #[error("edit offset {offset} out of bounds (len {len})")]
    OutOfBounds {
        /// Offending offset
        offset: usize,
        /// Source length in bytes
        len: usize,
    },

    /// Offset inside a multi-byte character
    #[error("edit offset {0} is not on a char boundary")]
    NotCharBoundary(usize),
}
