//! Per-file and batch results with their console lines

use crate::error::ProcessError;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;
use tci_rewrite::{RewriteOutcome, RuleReport};
use tci_source::ContentHash;

/// What the rewrite did to a modified file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Hash of the contents before writing
    pub before: ContentHash,
    /// Hash of the written contents
    pub after: ContentHash,
    /// Per-rule counters
    pub reports: Vec<RuleReport>,
}

impl RewriteSummary {
    /// Total constructs rewritten
    #[must_use]
    pub fn augmented(&self) -> usize {
        self.reports.iter().map(|r| r.augmented).sum()
    }
}

impl From<&RewriteOutcome> for RewriteSummary {
    fn from(outcome: &RewriteOutcome) -> Self {
        Self {
            before: outcome.original,
            after: outcome.output.hash(),
            reports: outcome.reports.clone(),
        }
    }
}

/// Outcome of processing one file
#[derive(Debug)]
pub enum ProcessingResult {
    /// Contents changed and were written back
    Modified(RewriteSummary),
    /// Nothing to rewrite, file left untouched
    Unchanged,
    /// File could not be processed
    Error(ProcessError),
}

impl ProcessingResult {
    /// Check if the file was written
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified(_))
    }
}

/// One file and its result
#[derive(Debug)]
pub struct FileReport {
    /// Path as configured
    pub path: PathBuf,
    /// What happened
    pub result: ProcessingResult,
}

impl FileReport {
    /// Create report for path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, result: ProcessingResult) -> Self {
        Self {
            path: path.into(),
            result,
        }
    }
}

impl Display for FileReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.result {
            ProcessingResult::Modified(_) => write!(f, "✓ Updated {path}"),
            ProcessingResult::Unchanged => write!(f, "- No changes needed for {path}"),
            ProcessingResult::Error(err) if err.is_not_found() => {
                write!(f, "{} File not found: {path}", err.glyph())
            }
            ProcessingResult::Error(err) => {
                write!(f, "{} Error processing {path}: {err}", err.glyph())
            }
        }
    }
}

/// Results of a batch in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-file reports
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Number of files written
    #[must_use]
    pub fn modified(&self) -> usize {
        self.files.iter().filter(|r| r.result.is_modified()).count()
    }

    /// Number of files left untouched because nothing matched
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.files
            .iter()
            .filter(|r| matches!(r.result, ProcessingResult::Unchanged))
            .count()
    }

    /// Number of files that errored (missing files included)
    #[must_use]
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|r| matches!(r.result, ProcessingResult::Error(_)))
            .count()
    }

    /// Closing summary line
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} files updated.", self.modified())
    }

    /// Write the blank separator and summary line
    ///
    /// # Errors
    ///
    /// Propagates write failures of `out`.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.summary())
    }
}
