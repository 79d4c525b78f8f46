//! Rule pipeline over one source text
//!
//! Each active rule sees a fresh parse of the previous rule's output, so
//! rules compose without sharing node offsets. Output that parses with more
//! errors than its input is rejected instead of written.

use crate::error::RewriteError;
use crate::profile::InjectionProfile;
use crate::registry::{default_rules, RuleRegistry};
use crate::rule::RuleReport;
use crate::rules::{EntityCreationRule, UpdatePreservationRule};
use tci_source::{ContentHash, Language, SourceText, SyntaxDocument};

/// Result of running all active rules over a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Rewritten text (identical to the input when nothing matched)
    pub output: SourceText,
    /// Per-rule counters in run order
    pub reports: Vec<RuleReport>,
    /// Hash of the input text
    pub original: ContentHash,
}

impl RewriteOutcome {
    /// Check if the output differs from the input
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.output.hash() != self.original
    }

    /// Total constructs rewritten across rules
    #[must_use]
    pub fn augmented(&self) -> usize {
        self.reports.iter().map(|r| r.augmented).sum()
    }
}

/// Runs a [`RuleRegistry`] over sources
#[derive(Debug)]
pub struct Rewriter {
    registry: RuleRegistry,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Rewriter {
    /// Create rewriter over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Rewriter with the built-in rules and default profile
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_rules(&InjectionProfile::default()))
    }

    /// Registered rules
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Registered rules, mutable for toggling
    #[inline]
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Run every active rule over `source`
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::Malformed`] when a rule's output parses with
    /// more errors than its input, and parse/edit errors as they occur.
    pub fn rewrite(
        &self,
        source: &SourceText,
        language: Language,
    ) -> Result<RewriteOutcome, RewriteError> {
        let original = source.hash();
        let mut doc = SyntaxDocument::parse(source.clone(), language)?;
        let mut reports = Vec::new();

        for rule in self.registry.active() {
            let plan = rule.plan(&doc);
            reports.push(plan.report());
            if plan.edits.is_empty() {
                continue;
            }

            let next = plan.edits.apply(doc.source())?;
            let reparsed = SyntaxDocument::parse(next, language)?;
            let (before, after) = (doc.error_count(), reparsed.error_count());
            if after > before {
                tracing::warn!(
                    "Rule {} produced {} new syntax errors",
                    rule.name(),
                    after - before
                );
                return Err(RewriteError::malformed(rule.name(), before, after));
            }
            tracing::debug!("Rule {}: {} edits applied", rule.name(), plan.edits.len());
            doc = reparsed;
        }

        Ok(RewriteOutcome {
            output: doc.into_source(),
            reports,
            original,
        })
    }
}

fn rewrite_with(
    rule_registry: RuleRegistry,
    content: &str,
) -> Result<String, RewriteError> {
    let outcome =
        Rewriter::new(rule_registry).rewrite(&SourceText::new(content), Language::TypeScript)?;
    Ok(outcome.output.into_string())
}

/// Inject tenant/camp fields into fresh entity literals of a TypeScript text
///
/// # Errors
///
/// See [`Rewriter::rewrite`].
pub fn augment_entity_creation(content: &str) -> Result<String, RewriteError> {
    let mut registry = RuleRegistry::new();
    registry.register(EntityCreationRule::new(InjectionProfile::default()));
    rewrite_with(registry, content)
}

/// Copy tenant/camp fields from the existing instance on entity rebuilds
///
/// # Errors
///
/// See [`Rewriter::rewrite`].
pub fn preserve_on_update(content: &str) -> Result<String, RewriteError> {
    let mut registry = RuleRegistry::new();
    registry.register(UpdatePreservationRule::new(InjectionProfile::default()));
    rewrite_with(registry, content)
}
