//! Update preservation
//!
//! When an entity is rebuilt from an existing instance
//! (`meta: { id: existing.meta.id, ... }`) the tenant and camp identifiers
//! are copied over from the same instance. Registered disabled by default.

use crate::profile::InjectionProfile;
use crate::query;
use crate::rule::{RewriteRule, RulePlan};
use crate::rules::plan_members_after;
use tci_source::{Node, SyntaxDocument};

/// Copies tenant and camp identifiers from the pre-update instance
#[derive(Debug, Clone)]
pub struct UpdatePreservationRule {
    profile: InjectionProfile,
}

impl UpdatePreservationRule {
    /// Rule identifier
    pub const NAME: &'static str = "update-preservation";

    /// Create rule for a profile
    #[inline]
    #[must_use]
    pub fn new(profile: InjectionProfile) -> Self {
        Self { profile }
    }

    /// Existing-instance binding whose id the first meta member copies
    fn copied_from<'p>(&'p self, doc: &SyntaxDocument, id_member: Node<'_>) -> Option<&'p str> {
        if id_member.kind() != "pair"
            || query::property_name(doc, id_member) != Some(self.profile.id_field.as_str())
        {
            return None;
        }
        let value = query::unwrap_expression(id_member.child_by_field_name("value")?);
        let path = query::dotted_path(doc, value)?;
        self.profile
            .existing_bindings
            .iter()
            .find(|b| path == self.profile.meta_path(b, &self.profile.id_field))
            .map(String::as_str)
    }
}

impl RewriteRule for UpdatePreservationRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn plan(&self, doc: &SyntaxDocument) -> RulePlan {
        let mut plan = RulePlan::new(Self::NAME, doc.source());

        for pair in doc.nodes().into_iter().filter(|n| n.kind() == "pair") {
            if query::property_name(doc, pair) != Some(self.profile.meta_key.as_str()) {
                continue;
            }
            let Some(meta) = query::object_value(pair) else {
                continue;
            };
            let Some(id_member) = query::object_members(meta).into_iter().next() else {
                continue;
            };
            let Some(binding) = self.copied_from(doc, id_member) else {
                continue;
            };
            plan.matched += 1;

            if query::has_any_member(doc, meta, &self.profile.tenant_fields()) {
                plan.skipped += 1;
                continue;
            }

            let fields = self.profile.tenant_fields().map(|field| {
                format!("{field}: {},", self.profile.meta_path(binding, field))
            });
            plan_members_after(doc, id_member, &fields, &mut plan.edits);
            plan.augmented += 1;
            tracing::debug!(
                "Preserving tenant context from {} at line {}",
                binding,
                pair.start_position().row + 1
            );
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tci_source::Language;

    fn rewrite(src: &str) -> String {
        let doc = SyntaxDocument::parse_str(src, Language::TypeScript).unwrap();
        let plan = UpdatePreservationRule::new(InjectionProfile::default()).plan(&doc);
        plan.edits.apply(doc.source()).unwrap().into_string()
    }

    #[test]
    fn copies_from_existing() {
        let input = "  const updated = {\n    ...existing,\n    meta: {\n      id: existing.meta.id,\n      name: input.name,\n    },\n  };\n";
        let expected = "  const updated = {\n    ...existing,\n    meta: {\n      id: existing.meta.id,\n      tenantId: existing.meta.tenantId,\n      campId: existing.meta.campId,\n      name: input.name,\n    },\n  };\n";
        assert_eq!(rewrite(input), expected);
    }

    #[test]
    fn uses_the_matched_binding() {
        let input = "function f() { return { meta: { id: current.meta.id, name } }; }";
        assert_eq!(
            rewrite(input),
            "function f() { return { meta: { id: current.meta.id, tenantId: current.meta.tenantId, campId: current.meta.campId, name } }; }"
        );
    }

    #[test]
    fn unknown_binding_is_left_alone() {
        let input = "const updated = { meta: { id: existingArea.meta.id, name } };";
        assert_eq!(rewrite(input), input);
    }

    #[test]
    fn already_preserved_is_skipped() {
        let input = "const updated = {\n  meta: {\n    id: entity.meta.id,\n    campId: entity.meta.campId,\n  },\n};\n";
        assert_eq!(rewrite(input), input);
    }

    #[test]
    fn fresh_entities_are_not_updates() {
        let input = "const newArea = { meta: { id: crypto.randomUUID() } };";
        assert_eq!(rewrite(input), input);
    }
}
