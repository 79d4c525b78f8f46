//! Built-in rewrite rules
//!
//! - [`EntityCreationRule`]: inject tenant/camp fields into freshly created
//!   entity literals, with an accessor declaration before the statement
//! - [`UpdatePreservationRule`]: copy tenant/camp fields from the existing
//!   instance when an entity is rebuilt
//! - [`AccessorImportRule`]: import the accessor where it is called

use crate::edit::EditPlan;
use tci_source::{Node, SyntaxDocument};

mod accessor_import;
mod entity_creation;
mod update_preservation;

pub use accessor_import::AccessorImportRule;
pub use entity_creation::EntityCreationRule;
pub use update_preservation::UpdatePreservationRule;

/// Plan `members` right after `anchor_member` inside an object literal
///
/// Members go on their own lines with the anchor's indentation when the
/// anchor starts its line, otherwise inline. A missing comma after the anchor
/// is added, and a comment trailing the anchor on its line stays with it.
pub(crate) fn plan_members_after(
    doc: &SyntaxDocument,
    anchor_member: Node<'_>,
    members: &[String],
    edits: &mut EditPlan,
) {
    let source = doc.source();
    let mut insert_at = anchor_member.end_byte();
    let mut next = anchor_member.next_sibling();

    match next {
        Some(comma) if comma.kind() == "," => {
            insert_at = comma.end_byte();
            next = comma.next_sibling();
        }
        _ => edits.insert(insert_at, ","),
    }

    if let Some(comment) = next {
        if comment.kind() == "comment"
            && comment.start_position().row == anchor_member.end_position().row
        {
            insert_at = comment.end_byte();
        }
    }

    let newline = source.newline_at(anchor_member.start_byte());
    let text: String = match source.indent_before(anchor_member.start_byte()) {
        Some(indent) => members.iter().map(|m| format!("{newline}{indent}{m}")).collect(),
        None => members.iter().map(|m| format!(" {m}")).collect(),
    };
    edits.insert(insert_at, text);
}
