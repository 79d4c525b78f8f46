//! Error types for source parsing

use crate::language::Language;

/// Errors while turning source text into a syntax tree
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// No grammar for the file extension
    #[error("unsupported file extension: '{0}'")]
    UnsupportedExtension(String),

    /// Grammar could not be loaded into the parser
    #[error("parser initialization failed: {0}")]
    ParserInit(String),

    /// tree-sitter returned no tree
    #[error("{0} parse failed")]
    ParseFailed(Language),
}
