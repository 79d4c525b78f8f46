//! Structural queries over TypeScript syntax trees
//!
//! Small shape predicates shared by the rules: unwrapping expression
//! wrappers, reading object members, resolving dotted call paths and
//! walking enclosing scopes.

use tci_source::{Node, SyntaxDocument};

/// Expression kinds that only wrap a single inner expression
const WRAPPERS: &[&str] = &[
    "parenthesized_expression",
    "as_expression",
    "satisfies_expression",
    "non_null_expression",
    "await_expression",
];

/// Nodes whose statements share one lexical scope
const BINDING_SCOPES: &[&str] = &["program", "statement_block", "switch_body"];

/// Nodes holding statements that run in source order
const STATEMENT_LISTS: &[&str] = &["program", "statement_block", "switch_case", "switch_default"];

/// Named children, skipping comments
#[must_use]
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// Strip parentheses, `as`, `satisfies`, `!` and `await` around an expression
#[must_use]
pub fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while WRAPPERS.contains(&current.kind()) {
        match named_children(current).into_iter().next() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// Property name of an object member (`pair` key or shorthand identifier)
#[must_use]
pub fn property_name<'d>(doc: &'d SyntaxDocument, member: Node<'_>) -> Option<&'d str> {
    match member.kind() {
        "pair" => {
            let key = member.child_by_field_name("key")?;
            match key.kind() {
                "property_identifier" | "number" => Some(doc.text(key)),
                "string" => Some(doc.text(key).trim_matches(|c| c == '"' || c == '\'')),
                _ => None,
            }
        }
        "shorthand_property_identifier" => Some(doc.text(member)),
        _ => None,
    }
}

/// Members of an object literal, in source order
#[must_use]
pub fn object_members(object: Node<'_>) -> Vec<Node<'_>> {
    named_children(object)
}

/// Find the `pair` member named `name`
#[must_use]
pub fn find_pair<'t>(doc: &SyntaxDocument, object: Node<'t>, name: &str) -> Option<Node<'t>> {
    object_members(object)
        .into_iter()
        .find(|m| m.kind() == "pair" && property_name(doc, *m) == Some(name))
}

/// Check whether any member (pair or shorthand) uses one of `names`
#[must_use]
pub fn has_any_member(doc: &SyntaxDocument, object: Node<'_>, names: &[&str]) -> bool {
    object_members(object)
        .into_iter()
        .filter_map(|m| property_name(doc, m))
        .any(|name| names.contains(&name))
}

/// Value of a `pair`, unwrapped, if it is an object literal
#[must_use]
pub fn object_value(pair: Node<'_>) -> Option<Node<'_>> {
    let value = unwrap_expression(pair.child_by_field_name("value")?);
    (value.kind() == "object").then_some(value)
}

/// Dotted path of an identifier or plain member chain (`crypto.randomUUID`)
///
/// Computed access and optional chaining yield `None`.
#[must_use]
pub fn dotted_path(doc: &SyntaxDocument, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "identifier" | "property_identifier" | "this" => Some(doc.text(node).to_string()),
        "member_expression" => {
            let mut cursor = node.walk();
            if node.children(&mut cursor).any(|c| c.kind() == "optional_chain") {
                return None;
            }
            let object = dotted_path(doc, node.child_by_field_name("object")?)?;
            let property = node.child_by_field_name("property")?;
            Some(format!("{object}.{}", doc.text(property)))
        }
        _ => None,
    }
}

/// Callee path of a call expression
#[must_use]
pub fn callee_path(doc: &SyntaxDocument, call: Node<'_>) -> Option<String> {
    if call.kind() != "call_expression" {
        return None;
    }
    dotted_path(doc, call.child_by_field_name("function")?)
}

/// Check for a zero-argument call to one of `paths`
#[must_use]
pub fn is_bare_call_to(doc: &SyntaxDocument, node: Node<'_>, paths: &[String]) -> bool {
    let Some(path) = callee_path(doc, node) else {
        return false;
    };
    let no_args = node
        .child_by_field_name("arguments")
        .is_some_and(|args| named_children(args).is_empty());
    no_args && paths.iter().any(|p| *p == path)
}

/// Statement to insert before when rewriting a declaration
///
/// `export const x = ...` is anchored on the export statement.
#[must_use]
pub fn declaring_statement(declaration: Node<'_>) -> Node<'_> {
    match declaration.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => declaration,
    }
}

/// Check whether a declaration starts with keyword `kw`
#[must_use]
pub fn is_declared_with(doc: &SyntaxDocument, declaration: Node<'_>, kw: &str) -> bool {
    doc.text(declaration)
        .strip_prefix(kw)
        .is_some_and(|rest| {
            !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

/// Names bound by a binding pattern (`a`, `{ a, b: c, d = 1 }`, `[e, ...f]`)
#[must_use]
pub fn bound_names<'d>(doc: &'d SyntaxDocument, pattern: Node<'_>) -> Vec<&'d str> {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => vec![doc.text(pattern)],
        "object_pattern" | "array_pattern" | "rest_pattern" => named_children(pattern)
            .into_iter()
            .flat_map(|p| bound_names(doc, p))
            .collect(),
        "pair_pattern" => pattern
            .child_by_field_name("value")
            .map(|v| bound_names(doc, v))
            .unwrap_or_default(),
        "object_assignment_pattern" | "assignment_pattern" => pattern
            .child_by_field_name("left")
            .map(|l| bound_names(doc, l))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn unexport(statement: Node<'_>) -> Option<Node<'_>> {
    if statement.kind() == "export_statement" {
        statement.child_by_field_name("declaration")
    } else {
        Some(statement)
    }
}

fn declarators(declaration: Node<'_>) -> Vec<Node<'_>> {
    if !matches!(declaration.kind(), "lexical_declaration" | "variable_declaration") {
        return Vec::new();
    }
    named_children(declaration)
        .into_iter()
        .filter(|d| d.kind() == "variable_declarator")
        .collect()
}

/// Names a statement declares in its scope
#[must_use]
pub fn declared_names<'d>(doc: &'d SyntaxDocument, statement: Node<'_>) -> Vec<&'d str> {
    let Some(declaration) = unexport(statement) else {
        return Vec::new();
    };
    match declaration.kind() {
        "function_declaration" | "generator_function_declaration" | "class_declaration" => {
            declaration
                .child_by_field_name("name")
                .map(|n| vec![doc.text(n)])
                .unwrap_or_default()
        }
        _ => declarators(declaration)
            .into_iter()
            .filter_map(|d| d.child_by_field_name("name"))
            .flat_map(|n| bound_names(doc, n))
            .collect(),
    }
}

/// Check whether a statement destructures every one of `fields` from a call
/// to `accessor` (`const { tenantId, campId } = getTenantContext();`)
#[must_use]
pub fn is_accessor_declaration(
    doc: &SyntaxDocument,
    statement: Node<'_>,
    accessor: &str,
    fields: &[&str],
) -> bool {
    let Some(declaration) = unexport(statement) else {
        return false;
    };
    declarators(declaration).into_iter().any(|d| {
        let calls_accessor = d
            .child_by_field_name("value")
            .and_then(|v| callee_path(doc, unwrap_expression(v)))
            .is_some_and(|path| path == accessor);
        let binds_all = d
            .child_by_field_name("name")
            .filter(|n| n.kind() == "object_pattern")
            .is_some_and(|n| {
                let names = bound_names(doc, n);
                fields.iter().all(|f| names.contains(f))
            });
        calls_accessor && binds_all
    })
}

/// Statements directly in a scope, flattening the clauses of a switch body
#[must_use]
pub fn scope_statements(scope: Node<'_>) -> Vec<Node<'_>> {
    if scope.kind() != "switch_body" {
        return named_children(scope);
    }
    named_children(scope)
        .into_iter()
        .flat_map(|clause| {
            let test = clause.child_by_field_name("value").map(|v| v.id());
            named_children(clause)
                .into_iter()
                .filter(move |s| Some(s.id()) != test)
        })
        .collect()
}

/// Parameters bound by the function or catch clause owning a block
fn parameter_names<'d>(doc: &'d SyntaxDocument, block: Node<'_>) -> Vec<&'d str> {
    let Some(owner) = block.parent() else {
        return Vec::new();
    };
    let mut names = Vec::new();
    if let Some(params) = owner.child_by_field_name("parameters") {
        for param in named_children(params) {
            let pattern = param.child_by_field_name("pattern").unwrap_or(param);
            names.extend(bound_names(doc, pattern));
        }
    }
    if let Some(param) = owner.child_by_field_name("parameter") {
        names.extend(bound_names(doc, param));
    }
    names
}

/// Check whether a scope binds any of `names`, wherever in the scope
#[must_use]
pub fn scope_binds_any(doc: &SyntaxDocument, scope: Node<'_>, names: &[&str]) -> bool {
    let mut bound: Vec<&str> = scope_statements(scope)
        .into_iter()
        .flat_map(|s| declared_names(doc, s))
        .collect();
    if scope.kind() == "statement_block" {
        bound.extend(parameter_names(doc, scope));
    }
    bound.iter().any(|b| names.contains(b))
}

/// Innermost binding scope around `node`
#[must_use]
pub fn innermost_scope(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if BINDING_SCOPES.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// Statement a declaration for `statement` is inserted before
///
/// Statements inside `case` clauses are lifted to the enclosing `switch`, so
/// the declaration is initialised on every path through it.
#[must_use]
pub fn declaration_anchor(statement: Node<'_>) -> Node<'_> {
    let mut anchor = statement;
    while let Some(clause) = anchor
        .parent()
        .filter(|p| matches!(p.kind(), "switch_case" | "switch_default"))
    {
        match clause.parent().and_then(|body| body.parent()) {
            Some(switch) => anchor = switch,
            None => break,
        }
    }
    anchor
}

/// Binding scopes from `node` outwards, up to the one holding `anchor`
#[must_use]
pub fn binding_scopes_through<'t>(node: Node<'t>, anchor: Node<'t>) -> Vec<Node<'t>> {
    let outer = innermost_scope(anchor).map(|s| s.id());
    let mut scopes = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if BINDING_SCOPES.contains(&parent.kind()) {
            scopes.push(parent);
            if Some(parent.id()) == outer {
                break;
            }
        }
        current = parent.parent();
    }
    scopes
}

/// Check whether an accessor declaration binding all `fields` runs before
/// `statement` in its own or an enclosing statement list
#[must_use]
pub fn accessor_declared_before(
    doc: &SyntaxDocument,
    statement: Node<'_>,
    accessor: &str,
    fields: &[&str],
) -> bool {
    let start = statement.start_byte();
    let mut current = statement.parent();
    while let Some(list) = current {
        if STATEMENT_LISTS.contains(&list.kind())
            && named_children(list)
                .into_iter()
                .take_while(|s| s.end_byte() <= start)
                .any(|s| is_accessor_declaration(doc, s, accessor, fields))
        {
            return true;
        }
        current = list.parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tci_source::Language;

    fn parse(src: &str) -> SyntaxDocument {
        SyntaxDocument::parse_str(src, Language::TypeScript).unwrap()
    }

    fn first<'d>(doc: &'d SyntaxDocument, kind: &str) -> Node<'d> {
        doc.nodes().into_iter().find(|n| n.kind() == kind).unwrap()
    }

    #[test]
    fn unwraps_type_assertions() {
        let doc = parse("const a = ({ x: 1 } as Foo);");
        let declarator = first(&doc, "variable_declarator");
        let value = declarator.child_by_field_name("value").unwrap();
        assert_eq!(unwrap_expression(value).kind(), "object");
    }

    #[test]
    fn reads_member_names() {
        let doc = parse("const a = { id: 1, 'name': 2, tenantId, ...rest };");
        let object = first(&doc, "object");
        let names: Vec<_> = object_members(object)
            .into_iter()
            .filter_map(|m| property_name(&doc, m))
            .collect();
        assert_eq!(names, vec!["id", "name", "tenantId"]);
        assert!(has_any_member(&doc, object, &["tenantId", "campId"]));
        assert!(find_pair(&doc, object, "name").is_some());
        assert!(find_pair(&doc, object, "tenantId").is_none());
    }

    #[test]
    fn resolves_call_paths() {
        let doc = parse("const a = crypto.randomUUID();\nconst b = crypto?.randomUUID();");
        let calls: Vec<_> = doc
            .nodes()
            .into_iter()
            .filter(|n| n.kind() == "call_expression")
            .collect();
        let generators = vec!["crypto.randomUUID".to_string()];

        assert_eq!(callee_path(&doc, calls[0]).as_deref(), Some("crypto.randomUUID"));
        assert!(is_bare_call_to(&doc, calls[0], &generators));
        assert!(!is_bare_call_to(&doc, calls[1], &generators));
    }

    #[test]
    fn call_with_arguments_is_not_bare() {
        let doc = parse("const a = crypto.randomUUID(seed);");
        let call = first(&doc, "call_expression");
        assert!(!is_bare_call_to(&doc, call, &["crypto.randomUUID".to_string()]));
    }

    #[test]
    fn export_statement_anchors_declaration() {
        let doc = parse("export const a = {};");
        let declaration = first(&doc, "lexical_declaration");
        assert_eq!(declaring_statement(declaration).kind(), "export_statement");
        assert!(is_declared_with(&doc, declaration, "const"));
        assert!(!is_declared_with(&doc, declaration, "let"));
    }

    const ACCESSOR: &str = "getTenantContext";
    const FIELDS: [&str; 2] = ["tenantId", "campId"];

    fn last<'d>(doc: &'d SyntaxDocument, kind: &str) -> Node<'d> {
        doc.nodes().into_iter().rev().find(|n| n.kind() == kind).unwrap()
    }

    #[test]
    fn finds_accessor_in_outer_scope() {
        let doc = parse(
            "function f() {\n  const { tenantId, campId } = getTenantContext();\n  if (x) {\n    const a = {};\n  }\n}",
        );
        let inner = last(&doc, "lexical_declaration");
        assert!(accessor_declared_before(&doc, inner, ACCESSOR, &FIELDS));
    }

    #[test]
    fn accessor_after_statement_is_not_visible() {
        let doc = parse("const a = {};\nconst { tenantId, campId } = getTenantContext();");
        let first_decl = first(&doc, "lexical_declaration");
        assert!(!accessor_declared_before(&doc, first_decl, ACCESSOR, &FIELDS));
    }

    #[test]
    fn accessor_declaration_must_bind_every_field() {
        for (src, expected) in [
            ("const { tenantId, campId } = getTenantContext();", true),
            ("export const { campId, tenantId } = getTenantContext();", true),
            ("const ctx = getTenantContext();", false),
            ("const { tenantId } = getTenantContext();", false),
            ("const { tenantId: t, campId: c } = getTenantContext();", false),
            ("const { tenantId, campId } = loadContext();", false),
        ] {
            let doc = parse(src);
            let statement = named_children(doc.root())[0];
            assert_eq!(
                is_accessor_declaration(&doc, statement, ACCESSOR, &FIELDS),
                expected,
                "{src}"
            );
        }
    }

    #[test]
    fn reads_bound_names() {
        let doc = parse("const { a, b: c, d = 1, ...e } = x, [f, , ...g] = y;\nfunction h() {}");
        let statements = named_children(doc.root());
        assert_eq!(declared_names(&doc, statements[0]), vec!["a", "c", "d", "e", "f", "g"]);
        assert_eq!(declared_names(&doc, statements[1]), vec!["h"]);
    }

    #[test]
    fn switch_case_statements_are_a_statement_list() {
        let doc = parse(
            "switch (k) {\n  case 1:\n    const { tenantId, campId } = getTenantContext();\n    const a = {};\n    break;\n  case 2:\n    const b = {};\n}",
        );
        let declarations: Vec<_> = doc
            .nodes()
            .into_iter()
            .filter(|n| n.kind() == "lexical_declaration")
            .collect();

        assert!(accessor_declared_before(&doc, declarations[1], ACCESSOR, &FIELDS));
        assert!(!accessor_declared_before(&doc, declarations[2], ACCESSOR, &FIELDS));
        assert_eq!(declaration_anchor(declarations[2]).kind(), "switch_statement");

        let body = first(&doc, "switch_body");
        assert!(scope_binds_any(&doc, body, &["campId"]));
        assert_eq!(scope_statements(body).len(), 4);
    }

    #[test]
    fn parameters_bind_in_function_body() {
        let doc = parse("function f(tenantId: string, { campId } = {}) {\n  const a = {};\n}");
        let body = first(&doc, "statement_block");
        assert!(scope_binds_any(&doc, body, &["tenantId"]));
        assert!(scope_binds_any(&doc, body, &["campId"]));
        assert!(!scope_binds_any(&doc, body, &["other"]));
    }

    #[test]
    fn scopes_through_lifted_anchor() {
        let doc = parse("function f() {\n  switch (k) {\n    case 1:\n      const a = {};\n  }\n}");
        let statement = last(&doc, "lexical_declaration");
        let anchor = declaration_anchor(statement);
        let kinds: Vec<_> = binding_scopes_through(statement, anchor)
            .into_iter()
            .map(|s| s.kind())
            .collect();
        assert_eq!(kinds, vec!["switch_body", "statement_block"]);
    }
}
