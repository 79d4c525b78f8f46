//! Parsed syntax documents
//!
//! A [`SyntaxDocument`] pairs a [`SourceText`] with its tree-sitter tree so
//! rules can query nodes by shape and address text by byte range.

use crate::error::ParseError;
use crate::language::Language;
use crate::source::SourceText;
use tree_sitter::{Node, Tree};

/// Source text together with its concrete syntax tree
#[derive(Debug, Clone)]
pub struct SyntaxDocument {
    source: SourceText,
    language: Language,
    tree: Tree,
}

impl SyntaxDocument {
    /// Parse source text into a document
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded or tree-sitter gives up
    pub fn parse(source: SourceText, language: Language) -> Result<Self, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| ParseError::ParserInit(e.to_string()))?;

        let tree = parser
            .parse(source.as_str(), None)
            .ok_or(ParseError::ParseFailed(language))?;

        Ok(Self {
            source,
            language,
            tree,
        })
    }

    /// Parse a string slice
    ///
    /// # Errors
    /// See [`SyntaxDocument::parse`]
    pub fn parse_str(text: &str, language: Language) -> Result<Self, ParseError> {
        Self::parse(SourceText::new(text), language)
    }

    /// Source text
    #[inline]
    #[must_use]
    pub fn source(&self) -> &SourceText {
        &self.source
    }

    /// Source language
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Root node of the tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by a node
    #[inline]
    #[must_use]
    pub fn text<'a>(&'a self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.source.as_str().as_bytes()).unwrap_or("")
    }

    /// Every node of the tree in document order
    #[must_use]
    pub fn nodes(&self) -> Vec<Node<'_>> {
        preorder(self.root())
    }

    /// Number of ERROR and MISSING nodes in the tree
    #[must_use]
    pub fn error_count(&self) -> usize {
        if !self.root().has_error() {
            return 0;
        }
        self.nodes()
            .into_iter()
            .filter(|n| n.is_error() || n.is_missing())
            .count()
    }

    /// Consume the document, keeping the source
    #[inline]
    #[must_use]
    pub fn into_source(self) -> SourceText {
        self.source
    }
}

/// Collect `root` and all of its descendants in pre-order
#[must_use]
pub fn preorder(root: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut cursor = root.walk();
    loop {
        out.push(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typescript_declaration() {
        let doc = SyntaxDocument::parse_str(
            "const newArea: Area = { meta: { id: crypto.randomUUID() } };",
            Language::TypeScript,
        )
        .unwrap();

        assert_eq!(doc.root().kind(), "program");
        assert_eq!(doc.error_count(), 0);
        assert!(doc.nodes().iter().any(|n| n.kind() == "variable_declarator"));
    }

    #[test]
    fn counts_syntax_errors() {
        let doc = SyntaxDocument::parse_str("const x = { a: ;", Language::TypeScript).unwrap();
        assert!(doc.error_count() > 0);
    }

    #[test]
    fn node_text_slices_source() {
        let doc = SyntaxDocument::parse_str("const a = 1;", Language::TypeScript).unwrap();
        let declarator = doc
            .nodes()
            .into_iter()
            .find(|n| n.kind() == "variable_declarator")
            .unwrap();
        let name = declarator.child_by_field_name("name").unwrap();
        assert_eq!(doc.text(name), "a");
    }

    #[test]
    fn preorder_visits_parent_before_children() {
        let doc = SyntaxDocument::parse_str("let a = [1, 2];", Language::JavaScript).unwrap();
        let kinds: Vec<&str> = doc.nodes().iter().map(|n| n.kind()).collect();
        let array = kinds.iter().position(|k| *k == "array").unwrap();
        let number = kinds.iter().position(|k| *k == "number").unwrap();
        assert_eq!(kinds[0], "program");
        assert!(array < number);
    }

    #[test]
    fn parses_tsx() {
        let doc = SyntaxDocument::parse_str(
            "const view = <div>{name}</div>;",
            Language::Tsx,
        )
        .unwrap();
        assert_eq!(doc.error_count(), 0);
    }
}
