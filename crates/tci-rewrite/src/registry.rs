//! Rule registration with per-rule enable flags

use crate::profile::InjectionProfile;
use crate::rule::RewriteRule;
use crate::rules::{AccessorImportRule, EntityCreationRule, UpdatePreservationRule};

struct RegisteredRule {
    rule: Box<dyn RewriteRule>,
    enabled: bool,
}

/// Ordered set of rewrite rules
///
/// Rules run in registration order; disabled rules stay registered so they
/// can be switched on explicitly.
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .field("active", &self.active_names())
            .finish()
    }
}

impl RuleRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an enabled rule
    pub fn register<R: RewriteRule + 'static>(&mut self, rule: R) {
        self.push(Box::new(rule), true);
    }

    /// Register a rule that only runs once enabled
    pub fn register_disabled<R: RewriteRule + 'static>(&mut self, rule: R) {
        self.push(Box::new(rule), false);
    }

    fn push(&mut self, rule: Box<dyn RewriteRule>, enabled: bool) {
        // re-registering a name replaces the earlier rule in place
        if let Some(slot) = self.rules.iter_mut().find(|r| r.rule.name() == rule.name()) {
            *slot = RegisteredRule { rule, enabled };
        } else {
            self.rules.push(RegisteredRule { rule, enabled });
        }
    }

    /// Toggle a rule by name, returns `false` if no such rule
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.rule.name() == name) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Enabled flag of a rule, `None` if not registered
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.rules
            .iter()
            .find(|r| r.rule.name() == name)
            .map(|r| r.enabled)
    }

    /// Enabled rules in run order
    pub fn active(&self) -> impl Iterator<Item = &dyn RewriteRule> + '_ {
        self.rules
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.rule.as_ref())
    }

    /// All registered rule names
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// Enabled rule names
    #[must_use]
    pub fn active_names(&self) -> Vec<&'static str> {
        self.active().map(|r| r.name()).collect()
    }

    /// Number of registered rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Built-in rules: entity creation enabled, update preservation and accessor
/// import registered but disabled
#[must_use]
pub fn default_rules(profile: &InjectionProfile) -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    registry.register(EntityCreationRule::new(profile.clone()));
    registry.register_disabled(UpdatePreservationRule::new(profile.clone()));
    registry.register_disabled(AccessorImportRule::new(profile.clone()));
    registry
}
