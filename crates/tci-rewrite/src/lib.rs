//! TCI Rewrite Layer
//!
//! Structural rewrite rules that inject ambient tenant context into entity
//! literals of TypeScript service modules.
//!
//! # Core Concepts
//!
//! - [`RewriteRule`]: a structural match plus an insertion policy
//! - [`EditPlan`]: byte-offset insertions guarded by the source hash
//! - [`RuleRegistry`]: ordered rules with per-rule enable flags
//! - [`Rewriter`]: runs active rules and rejects malformed output
//! - [`InjectionProfile`]: field names, accessor and matching knobs
//!
//! # Example
//!
//! ```rust,ignore
//! use tci_rewrite::Rewriter;
//! use tci_source::{Language, SourceText};
//!
//! let source = SourceText::new(service_module);
//! let outcome = Rewriter::default().rewrite(&source, Language::TypeScript)?;
//! if outcome.changed() {
//!     println!("{} entities augmented", outcome.augmented());
//! }
//! ```

#![warn(unreachable_pub)]

mod edit;
mod error;
mod profile;
pub mod query;
mod registry;
mod rewriter;
mod rule;
mod rules;

pub use edit::{EditError, EditPlan, TextEdit};
pub use error::RewriteError;
pub use profile::{
    InjectionProfile, TargetKind, TargetNames, DEFAULT_ENTITY_SUFFIXES, DEFAULT_EXISTING_BINDINGS,
};
pub use registry::{default_rules, RuleRegistry};
pub use rewriter::{augment_entity_creation, preserve_on_update, RewriteOutcome, Rewriter};
pub use rule::{RewriteRule, RulePlan, RuleReport};
pub use rules::{AccessorImportRule, EntityCreationRule, UpdatePreservationRule};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
