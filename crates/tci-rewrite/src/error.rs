//! Error types for the rewrite layer

use crate::edit::EditError;
use tci_source::ParseError;

/// Errors while running rules over a document
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Source could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Planned edits could not be applied
    #[error(transparent)]
    Edit(#[from] EditError),

    /// A rule produced output with more syntax errors than its input
    #[error("rule '{rule}' produced malformed output ({before} -> {after} syntax errors)")]
    Malformed {
        /// Name of the rule whose edits were rejected
        rule: &'static str,
        /// Syntax errors before the rule ran
        before: usize,
        /// Syntax errors in the rule's output
        after: usize,
    },
}

impl RewriteError {
    /// Create malformed-output error for a rule
    pub fn malformed(rule: &'static str, before: usize, after: usize) -> Self {
        Self::Malformed {
            rule,
            before,
            after,
        }
    }
}
