//! Entity-creation augmentation
//!
//! Matches `const <name> = { ..., meta: { id: crypto.randomUUID(), ... } }`
//! and rewrites it to
//!
//! ```text
//! const { tenantId, campId } = getTenantContext();
//! const <name> = { ..., meta: { id: crypto.randomUUID(), tenantId, campId, ... } }
//! ```

use crate::profile::{InjectionProfile, TargetKind};
use crate::query;
use crate::rule::{RewriteRule, RulePlan};
use crate::rules::plan_members_after;
use tci_source::{Node, SyntaxDocument};

/// A declarator whose literal builds a new entity
#[derive(Debug, Clone, Copy)]
struct Creation<'t> {
    statement: Node<'t>,
    meta: Node<'t>,
    id_member: Node<'t>,
}

/// Injects tenant and camp identifiers into new entity literals
#[derive(Debug, Clone)]
pub struct EntityCreationRule {
    profile: InjectionProfile,
}

impl EntityCreationRule {
    /// Rule identifier
    pub const NAME: &'static str = "entity-creation";

    /// Create rule for a profile
    #[inline]
    #[must_use]
    pub fn new(profile: InjectionProfile) -> Self {
        Self { profile }
    }

    fn match_declarator<'t>(
        &self,
        doc: &SyntaxDocument,
        declarator: Node<'t>,
    ) -> Option<(String, TargetKind, Creation<'t>)> {
        let declaration = declarator.parent()?;
        if declaration.kind() != "lexical_declaration"
            || !query::is_declared_with(doc, declaration, "const")
        {
            return None;
        }

        let name = declarator.child_by_field_name("name")?;
        if name.kind() != "identifier" {
            return None;
        }
        let binding = doc.text(name).to_string();
        let target = self.profile.targets.classify(&binding)?;

        let literal = query::unwrap_expression(declarator.child_by_field_name("value")?);
        if literal.kind() != "object" {
            return None;
        }
        let meta = query::object_value(query::find_pair(doc, literal, &self.profile.meta_key)?)?;

        let id_member = query::object_members(meta).into_iter().next()?;
        if id_member.kind() != "pair"
            || query::property_name(doc, id_member) != Some(self.profile.id_field.as_str())
        {
            return None;
        }
        let id_value = query::unwrap_expression(id_member.child_by_field_name("value")?);
        if !query::is_bare_call_to(doc, id_value, &self.profile.id_generators) {
            return None;
        }

        let creation = Creation {
            statement: query::declaring_statement(declaration),
            meta,
            id_member,
        };
        Some((binding, target, creation))
    }

    /// Plan the accessor declaration unless one is already visible
    ///
    /// `planned` records (statement list node id, offset) of declarations
    /// added by this pass.
    fn plan_declaration(
        &self,
        doc: &SyntaxDocument,
        statement: Node<'_>,
        planned: &mut Vec<(usize, usize)>,
        plan: &mut RulePlan,
    ) -> Accessor {
        let fields = self.profile.tenant_fields();
        if query::accessor_declared_before(doc, statement, &self.profile.accessor, &fields) {
            return Accessor::Visible;
        }
        let start = statement.start_byte();
        let already_planned = planned
            .iter()
            .any(|(list, at)| *at <= start && has_ancestor(statement, *list));
        if already_planned {
            return Accessor::Visible;
        }

        let anchor = query::declaration_anchor(statement);
        let Some(list) = anchor.parent() else {
            return Accessor::Conflict;
        };
        let conflict = query::binding_scopes_through(statement, anchor)
            .into_iter()
            .any(|scope| query::scope_binds_any(doc, scope, &fields));
        if conflict {
            return Accessor::Conflict;
        }

        let at = anchor.start_byte();
        let source = doc.source();
        let indent = source
            .indent_before(at)
            .unwrap_or(self.profile.default_indent.as_str());
        let newline = source.newline_at(at);
        plan.edits
            .insert(at, format!("{}{newline}{indent}", self.profile.declaration()));
        planned.push((list.id(), at));
        Accessor::Added
    }
}

/// How the accessor bindings reach a rewritten literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    /// A declaration already runs before the literal
    Visible,
    /// A declaration was planned
    Added,
    /// The scope already binds one of the names some other way
    Conflict,
}

fn has_ancestor(node: Node<'_>, id: usize) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id() == id {
            return true;
        }
        current = parent.parent();
    }
    false
}

impl RewriteRule for EntityCreationRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn plan(&self, doc: &SyntaxDocument) -> RulePlan {
        let mut plan = RulePlan::new(Self::NAME, doc.source());
        let mut planned = Vec::new();
        let fields = [
            format!("{},", self.profile.tenant_field),
            format!("{},", self.profile.camp_field),
        ];

        for declarator in doc
            .nodes()
            .into_iter()
            .filter(|n| n.kind() == "variable_declarator")
        {
            let Some((binding, target, creation)) = self.match_declarator(doc, declarator) else {
                continue;
            };
            plan.matched += 1;

            if query::has_any_member(doc, creation.meta, &self.profile.tenant_fields()) {
                tracing::debug!("Skipping {}: tenant context already present", binding);
                plan.skipped += 1;
                continue;
            }

            let accessor = self.plan_declaration(doc, creation.statement, &mut planned, &mut plan);
            if accessor == Accessor::Conflict {
                tracing::debug!(
                    "Skipping {}: {} or {} already bound in scope",
                    binding,
                    self.profile.tenant_field,
                    self.profile.camp_field
                );
                plan.skipped += 1;
                continue;
            }
            let declared = accessor == Accessor::Added;
            plan_members_after(doc, creation.id_member, &fields, &mut plan.edits);
            plan.augmented += 1;

            let line = creation.statement.start_position().row + 1;
            match target {
                TargetKind::Entity(suffix) => tracing::debug!(
                    "Augmenting {} entity {} at line {} (declaration added: {})",
                    suffix,
                    binding,
                    line,
                    declared
                ),
                TargetKind::Unconstrained => tracing::debug!(
                    "Augmenting {} at line {} (declaration added: {})",
                    binding,
                    line,
                    declared
                ),
            }
        }

        plan
    }
}
