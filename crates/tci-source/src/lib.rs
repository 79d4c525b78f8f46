//! TCI Source Layer
//!
//! Content-addressed source text and language-aware parsing.
//!
//! # Core Concepts
//!
//! - [`SourceText`]: immutable file contents with a Blake3 [`ContentHash`]
//! - [`Language`]: grammar selection from file extensions
//! - [`SyntaxDocument`]: source text paired with its tree-sitter tree
//!
//! # Example
//!
//! ```rust,ignore
//! use tci_source::{Language, SourceText, SyntaxDocument};
//!
//! let source = SourceText::new("const a = { meta: { id: crypto.randomUUID() } };");
//! let doc = SyntaxDocument::parse(source, Language::TypeScript)?;
//! assert_eq!(doc.error_count(), 0);
//! ```

#![warn(unreachable_pub)]

mod document;
mod error;
mod hash;
mod language;
mod source;

pub use document::{preorder, SyntaxDocument};
pub use error::ParseError;
pub use hash::ContentHash;
pub use language::Language;
pub use source::SourceText;

/// Re-exported so downstream crates name nodes without a direct dependency
pub use tree_sitter::Node;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn document_keeps_source_hash() {
        let source = SourceText::new("const x = { meta: {} };");
        let hash = source.hash();
        let doc = SyntaxDocument::parse(source, Language::TypeScript).unwrap();

        assert_eq!(doc.source().hash(), hash);
        assert_eq!(doc.into_source().hash(), hash);
    }
}
