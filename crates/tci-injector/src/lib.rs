//! TCI Injector
//!
//! Batch tool that rewrites a fixed list of TypeScript service modules so
//! every freshly created entity carries the ambient tenant and camp
//! identifiers.
//!
//! # Example
//!
//! ```rust,ignore
//! use tci_injector::{run, InjectorConfig};
//!
//! let report = run(&InjectorConfig::default(), &mut std::io::stdout())?;
//! assert_eq!(report.files.len(), 13);
//! ```

#![warn(unreachable_pub)]

mod config;
mod error;
mod processor;
mod report;

pub use config::{InjectorConfig, DEFAULT_BASE_DIR, DEFAULT_MAX_FILE_SIZE, DEFAULT_SERVICE_FILES};
pub use error::ProcessError;
pub use processor::FileProcessor;
pub use report::{BatchReport, FileReport, ProcessingResult, RewriteSummary};

use std::io::{self, Write};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process every configured file, writing one console line per file and the
/// closing summary to `out`
///
/// # Errors
///
/// Only write failures on `out`; per-file failures are part of the report.
pub fn run(config: &InjectorConfig, out: &mut impl Write) -> io::Result<BatchReport> {
    let processor = FileProcessor::new(config);
    tracing::debug!(
        "Running rules {:?} over {}",
        processor.rewriter().registry().active_names(),
        config.base_dir.display()
    );

    let mut write_error = None;
    let batch = processor.process_batch(&config.targets(), |report| {
        if write_error.is_none() {
            if let Err(err) = writeln!(out, "{report}") {
                write_error = Some(err);
            }
        }
    });
    if let Some(err) = write_error {
        return Err(err);
    }

    batch.write_summary(out)?;
    Ok(batch)
}
