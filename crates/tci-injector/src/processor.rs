//! File processor
//!
//! Read, rewrite, and write back only when the contents changed. Each file's
//! cycle is independent; a failure is reported and the batch continues.

use crate::config::InjectorConfig;
use crate::error::ProcessError;
use crate::report::{BatchReport, FileReport, ProcessingResult, RewriteSummary};
use std::fs;
use std::path::{Path, PathBuf};
use tci_rewrite::Rewriter;
use tci_source::{Language, SourceText};

/// Applies the configured rules to files in place
#[derive(Debug)]
pub struct FileProcessor {
    rewriter: Rewriter,
    max_file_size: u64,
}

impl FileProcessor {
    /// Create processor from configuration
    #[must_use]
    pub fn new(config: &InjectorConfig) -> Self {
        Self {
            rewriter: Rewriter::new(config.registry()),
            max_file_size: config.max_file_size,
        }
    }

    /// Underlying rewriter
    #[inline]
    #[must_use]
    pub fn rewriter(&self) -> &Rewriter {
        &self.rewriter
    }

    /// Process one file, never failing
    #[must_use]
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        match self.try_process(path) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("Failed to process {}: {}", path.display(), err);
                ProcessingResult::Error(err)
            }
        }
    }

    fn try_process(&self, path: &Path) -> Result<ProcessingResult, ProcessError> {
        let metadata = fs::metadata(path).map_err(|e| ProcessError::read(path, e))?;
        if metadata.len() > self.max_file_size {
            return Err(ProcessError::TooLarge {
                size: metadata.len(),
                max: self.max_file_size,
            });
        }
        let language = Language::from_path(path)
            .ok_or_else(|| ProcessError::UnsupportedFile(path.to_path_buf()))?;

        let content = fs::read_to_string(path).map_err(|e| ProcessError::read(path, e))?;
        let outcome = self.rewriter.rewrite(&SourceText::new(content), language)?;

        if !outcome.changed() {
            tracing::debug!("No changes for {}", path.display());
            return Ok(ProcessingResult::Unchanged);
        }

        fs::write(path, outcome.output.as_str()).map_err(|e| ProcessError::write(path, e))?;
        let summary = RewriteSummary::from(&outcome);
        tracing::info!(
            "Updated {}: {} entities augmented ({} -> {})",
            path.display(),
            summary.augmented(),
            summary.before.short(),
            summary.after.short()
        );
        Ok(ProcessingResult::Modified(summary))
    }

    /// Process files in order, calling `on_file` after each
    pub fn process_batch(
        &self,
        paths: &[PathBuf],
        mut on_file: impl FnMut(&FileReport),
    ) -> BatchReport {
        let mut batch = BatchReport::default();
        for path in paths {
            let report = FileReport::new(path.clone(), self.process_file(path));
            on_file(&report);
            batch.files.push(report);
        }
        tracing::info!(
            "Processed {} files: {} updated, {} failed",
            batch.files.len(),
            batch.modified(),
            batch.failed()
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_FILE_SIZE;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tci_rewrite::{EntityCreationRule, InjectionProfile, RewriteRule, RuleRegistry, RulePlan};
    use tci_source::SyntaxDocument;
    use tci_test_utils::{service_dir, service_path, AREAS_SERVICE, PLAIN_MODULE};

    /// Replaces one file with a directory while its rewrite is planned, so
    /// the following write fails
    #[derive(Debug)]
    struct DirectoryInPlaceRule {
        target: Mutex<Option<PathBuf>>,
    }

    impl RewriteRule for DirectoryInPlaceRule {
        fn name(&self) -> &'static str {
            "directory-in-place"
        }

        fn plan(&self, doc: &SyntaxDocument) -> RulePlan {
            if let Some(path) = self.target.lock().unwrap().take() {
                fs::remove_file(&path).unwrap();
                fs::create_dir(&path).unwrap();
            }
            RulePlan::new(self.name(), doc.source())
        }
    }

    #[test]
    fn rewrites_matching_file() {
        let root = service_dir(&[("areasService.ts", AREAS_SERVICE.as_bytes())]);
        let path = service_path(root.path(), "areasService.ts");

        let result = FileProcessor::new(&InjectorConfig::default()).process_file(&path);

        let ProcessingResult::Modified(summary) = result else {
            panic!("expected Modified");
        };
        assert_eq!(summary.augmented(), 1);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(summary.after, SourceText::new(written.clone()).hash());
        assert!(written.contains("  const { tenantId, campId } = getTenantContext();\n"));
    }

    #[test]
    fn plain_module_is_unchanged() {
        let root = service_dir(&[("colorsService.ts", PLAIN_MODULE.as_bytes())]);
        let path = service_path(root.path(), "colorsService.ts");

        let result = FileProcessor::new(&InjectorConfig::default()).process_file(&path);

        assert!(matches!(result, ProcessingResult::Unchanged));
        assert_eq!(fs::read_to_string(&path).unwrap(), PLAIN_MODULE);
    }

    #[test]
    fn oversized_file_is_rejected() {
        let root = service_dir(&[("areasService.ts", AREAS_SERVICE.as_bytes())]);
        let path = service_path(root.path(), "areasService.ts");
        let config = InjectorConfig::default().with_max_file_size(16);

        let result = FileProcessor::new(&config).process_file(&path);

        assert!(matches!(
            result,
            ProcessingResult::Error(ProcessError::TooLarge { max: 16, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), AREAS_SERVICE);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let root = service_dir(&[("notes.md", b"# notes\n".as_slice())]);
        let path = service_path(root.path(), "notes.md");

        let result = FileProcessor::new(&InjectorConfig::default()).process_file(&path);

        assert!(matches!(
            result,
            ProcessingResult::Error(ProcessError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = service_dir(&[]);
        let path = service_path(root.path(), "rolesService.ts");

        let result = FileProcessor::new(&InjectorConfig::default()).process_file(&path);

        assert!(matches!(result, ProcessingResult::Error(ProcessError::NotFound(_))));
    }

    #[test]
    fn write_failure_is_reported_and_batch_continues() {
        let root = service_dir(&[
            ("areasService.ts", AREAS_SERVICE.as_bytes()),
            ("rolesService.ts", AREAS_SERVICE.as_bytes()),
        ]);
        let first = service_path(root.path(), "areasService.ts");
        let second = service_path(root.path(), "rolesService.ts");

        let mut registry = RuleRegistry::new();
        registry.register(EntityCreationRule::new(InjectionProfile::default()));
        registry.register(DirectoryInPlaceRule {
            target: Mutex::new(Some(first.clone())),
        });
        let processor = FileProcessor {
            rewriter: Rewriter::new(registry),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        };

        let mut lines = Vec::new();
        let batch = processor.process_batch(&[first.clone(), second.clone()], |report| {
            lines.push(report.to_string());
        });

        assert!(matches!(
            batch.files[0].result,
            ProcessingResult::Error(ProcessError::Write { .. })
        ));
        assert!(lines[0].starts_with(&format!("✗ Error processing {}: ", first.display())));
        assert_eq!(lines[1], format!("✓ Updated {}", second.display()));
        assert_eq!((batch.modified(), batch.failed()), (1, 1));
        assert!(fs::read_to_string(&second)
            .unwrap()
            .contains("const { tenantId, campId } = getTenantContext();"));
    }
}
