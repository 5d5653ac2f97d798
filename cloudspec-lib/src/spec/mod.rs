//! The specification abstract syntax tree
//!
//! A [`Spec`] is a named list of [`Group`]s; each group holds [`Rule`]s bound to a
//! resource type by fully-qualified name. Rules carry [`FilterExpr`]s, which select
//! the resources the rule applies to, and [`AssertExpr`]s, which every selected
//! resource must satisfy.
//!
//! The tree is plain immutable data. [`compile`] is the front-end that decodes a TOML
//! document into a tree; resource type names are kept as written and only resolved
//! by preflight and the loader.

mod compile;
mod document;
mod expression;
mod rule;

pub use compile::{SyntaxError, compile};
pub use document::{Group, Spec};
pub use expression::{AssertExpr, FilterExpr};
pub use rule::Rule;
