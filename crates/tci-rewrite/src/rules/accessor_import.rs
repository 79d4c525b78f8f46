//! Accessor import
//!
//! Adds `import { getTenantContext } from "@/utils/tenantContext";` to files
//! that call the accessor without importing or defining it.

use crate::profile::InjectionProfile;
use crate::query;
use crate::rule::{RewriteRule, RulePlan};
use tci_source::{Node, SyntaxDocument};

/// Imports the ambient accessor where it is used
#[derive(Debug, Clone)]
pub struct AccessorImportRule {
    profile: InjectionProfile,
}

impl AccessorImportRule {
    /// Rule identifier
    pub const NAME: &'static str = "accessor-import";

    /// Create rule for a profile
    #[inline]
    #[must_use]
    pub fn new(profile: InjectionProfile) -> Self {
        Self { profile }
    }

    /// Check whether `node` brings the accessor name into scope
    fn binds_accessor(&self, doc: &SyntaxDocument, node: Node<'_>) -> bool {
        let accessor = self.profile.accessor.as_str();
        match node.kind() {
            "import_specifier" => {
                let local = node
                    .child_by_field_name("alias")
                    .or_else(|| node.child_by_field_name("name"));
                local.is_some_and(|n| doc.text(n) == accessor)
            }
            "function_declaration" | "variable_declarator" => node
                .child_by_field_name("name")
                .is_some_and(|n| doc.text(n) == accessor),
            _ => false,
        }
    }
}

impl RewriteRule for AccessorImportRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn plan(&self, doc: &SyntaxDocument) -> RulePlan {
        let mut plan = RulePlan::new(Self::NAME, doc.source());
        let nodes = doc.nodes();
        let accessor = self.profile.accessor.as_str();

        let called = nodes
            .iter()
            .any(|n| query::callee_path(doc, *n).as_deref() == Some(accessor));
        if !called {
            return plan;
        }
        plan.matched += 1;

        if nodes.iter().any(|n| self.binds_accessor(doc, *n)) {
            plan.skipped += 1;
            return plan;
        }

        let import = self.profile.import_statement();
        let last_import = query::named_children(doc.root())
            .into_iter()
            .rev()
            .find(|n| n.kind() == "import_statement");
        match last_import {
            Some(stmt) => plan.edits.insert(stmt.end_byte(), format!("\n{import}")),
            None => plan.edits.insert(0, format!("{import}\n")),
        }
        plan.augmented += 1;
        tracing::debug!("Adding import of {} from {}", accessor, self.profile.accessor_module);

        plan
    }
}
