//! Evaluation of specifications against loaded resources
//!
//! The [`Validator`] walks a specification depth-first. For each rule it reads the
//! candidate resources of the rule's type from the store, keeps those selected by every
//! filter, and checks every assertion against each selected resource.
//!
//! Results form a tree that mirrors the specification: a [`SpecResult`] holds one
//! [`GroupResult`] per group, which holds one [`RuleResult`] per rule, in declaration
//! order. A rule that cannot be evaluated is reported as errored with a [`RuleFault`]
//! and never stops its siblings.

mod results;
mod rule_fault;
mod validator;

pub use results::{AssertionFailure, GroupResult, RuleResult, RuleStatus, SpecResult, Summary};
pub use rule_fault::RuleFault;
pub use validator::Validator;
