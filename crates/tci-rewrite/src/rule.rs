//! Rewrite rule trait and per-rule plans

use crate::edit::EditPlan;
use tci_source::{SourceText, SyntaxDocument};

/// A structural match paired with a replacement policy
///
/// Implement this trait to add a new rewrite. Rules are pure: they inspect
/// a parsed document and describe insertions, they never touch files.
pub trait RewriteRule: Send + Sync {
    /// Stable rule identifier (used for toggling and reporting)
    fn name(&self) -> &'static str;

    /// Plan the insertions this rule makes to `doc`
    fn plan(&self, doc: &SyntaxDocument) -> RulePlan;
}

/// Edits one rule planned for one document, with match counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePlan {
    rule: &'static str,
    /// Planned insertions
    pub edits: EditPlan,
    /// Constructs that matched the rule's shape
    pub matched: usize,
    /// Matches that were rewritten
    pub augmented: usize,
    /// Matches left alone: already rewritten, or the names are bound
    /// some other way in scope
    pub skipped: usize,
}

impl RulePlan {
    /// Create an empty plan for `rule` over `base`
    #[inline]
    #[must_use]
    pub fn new(rule: &'static str, base: &SourceText) -> Self {
        Self {
            rule,
            edits: EditPlan::new(base),
            matched: 0,
            augmented: 0,
            skipped: 0,
        }
    }

    /// Rule that produced the plan
    #[inline]
    #[must_use]
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Counters without the edits
    #[inline]
    #[must_use]
    pub fn report(&self) -> RuleReport {
        RuleReport {
            rule: self.rule,
            matched: self.matched,
            augmented: self.augmented,
            skipped: self.skipped,
        }
    }
}

/// Outcome counters of one rule over one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleReport {
    /// Rule identifier
    pub rule: &'static str,
    /// Constructs that matched the rule's shape
    pub matched: usize,
    /// Matches that were rewritten
    pub augmented: usize,
    /// Matches left alone
    pub skipped: usize,
}

impl std::fmt::Display for RuleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} matched, {} augmented, {} skipped",
            self.rule, self.matched, self.augmented, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_copies_counters() {
        let mut plan = RulePlan::new("test", &SourceText::new(""));
        plan.matched = 3;
        plan.augmented = 2;
        plan.skipped = 1;

        let report = plan.report();
        assert_eq!(report.rule, "test");
        assert_eq!(report.to_string(), "test: 3 matched, 2 augmented, 1 skipped");
        assert!(plan.edits.is_empty());
    }
}
