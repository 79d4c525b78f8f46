//! Per-file processing errors
//!
//! Every variant is caught at the file boundary, reported, and processing
//! continues with the next file.

use std::io;
use std::path::{Path, PathBuf};
use tci_rewrite::RewriteError;

/// Errors while processing one file
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// File does not exist
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// IO error during read (including invalid UTF-8)
    #[error("io error reading {path}: {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// IO error during write
    #[error("io error writing {path}: {source}")]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// No grammar for the file extension
    #[error("unsupported file type: {0}")]
    UnsupportedFile(PathBuf),

    /// File exceeds the configured maximum size
    #[error("file too large: {size} bytes (max {max})")]
    TooLarge {
        /// Size on disk in bytes
        size: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// Rewrite failed
    #[error("rewrite failed: {0}")]
    Rewrite(#[from] RewriteError),
}

impl ProcessError {
    /// Create read error for path, mapping missing files to [`ProcessError::NotFound`]
    pub fn read(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Read { path, source }
        }
    }

    /// Create write error for path
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Console glyph for this error
    #[must_use]
    pub fn glyph(&self) -> char {
        match self {
            Self::NotFound(_) => '!',
            _ => '✗',
        }
    }

    /// Check if the file was missing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
