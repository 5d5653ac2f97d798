use super::RuleFault;
use crate::model::AttributeValue;
use core::ops::AddAssign;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use strum::Display;

/// The terminal state of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Succeeded,
    Failed,
    Errored,
}

/// One assertion that evaluated to false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionFailure {
    pub resource_id: String,
    pub attribute: String,
    pub actual: AttributeValue,

    /// The assertion's evaluator, as written
    pub expected: String,
}

/// Outcome counts over a set of rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl Summary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    fn count(&mut self, status: RuleStatus) {
        match status {
            RuleStatus::Succeeded => self.passed += 1,
            RuleStatus::Failed => self.failed += 1,
            RuleStatus::Errored => self.errored += 1,
        }
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.passed += rhs.passed;
        self.failed += rhs.failed;
        self.errored += rhs.errored;
    }
}

/// The result of validating one rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    rule_name: String,
    resource_type: String,
    status: RuleStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_cause")]
    cause: Option<Arc<RuleFault>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<AssertionFailure>,
}

impl RuleResult {
    pub(crate) fn succeeded(rule_name: &str, resource_type: &str) -> Self {
        Self::with_status(rule_name, resource_type, RuleStatus::Succeeded)
    }

    pub(crate) fn failed(rule_name: &str, resource_type: &str, reason: String, failures: Vec<AssertionFailure>) -> Self {
        Self {
            reason: Some(reason),
            failures,
            ..Self::with_status(rule_name, resource_type, RuleStatus::Failed)
        }
    }

    pub(crate) fn errored(rule_name: &str, resource_type: &str, fault: RuleFault) -> Self {
        Self {
            reason: Some(fault.to_string()),
            cause: Some(Arc::new(fault)),
            ..Self::with_status(rule_name, resource_type, RuleStatus::Errored)
        }
    }

    fn with_status(rule_name: &str, resource_type: &str, status: RuleStatus) -> Self {
        Self {
            rule_name: rule_name.to_string(),
            resource_type: resource_type.to_string(),
            status,
            reason: None,
            cause: None,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    #[must_use]
    pub const fn status(&self) -> RuleStatus {
        self.status
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.status == RuleStatus::Succeeded
    }

    #[must_use]
    pub fn error(&self) -> bool {
        self.status == RuleStatus::Errored
    }

    /// A human summary of why the rule did not succeed
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    #[must_use]
    pub fn cause(&self) -> Option<&RuleFault> {
        self.cause.as_deref()
    }

    #[must_use]
    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }
}

#[expect(clippy::ref_option, reason = "signature is dictated by serde's serialize_with")]
fn serialize_cause<S>(cause: &Option<Arc<RuleFault>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match cause {
        Some(fault) => serializer.collect_str(fault),
        None => serializer.serialize_none(),
    }
}

/// The results of validating one group, in rule declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    group_name: String,
    rule_results: Vec<RuleResult>,
}

impl GroupResult {
    pub(crate) fn new(group_name: &str, rule_results: Vec<RuleResult>) -> Self {
        Self {
            group_name: group_name.to_string(),
            rule_results,
        }
    }

    #[must_use]
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    #[must_use]
    pub fn rule_results(&self) -> &[RuleResult] {
        &self.rule_results
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for rule in &self.rule_results {
            summary.count(rule.status());
        }
        summary
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.rule_results.iter().all(RuleResult::success)
    }
}

/// The results of validating a specification, in group declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SpecResult {
    spec_name: String,
    group_results: Vec<GroupResult>,
}

impl SpecResult {
    pub(crate) fn new(spec_name: &str, group_results: Vec<GroupResult>) -> Self {
        Self {
            spec_name: spec_name.to_string(),
            group_results,
        }
    }

    #[must_use]
    pub fn spec_name(&self) -> &str {
        &self.spec_name
    }

    #[must_use]
    pub fn group_results(&self) -> &[GroupResult] {
        &self.group_results
    }

    /// Every rule result with its group name, in declaration order
    pub fn rule_results(&self) -> impl Iterator<Item = (&str, &RuleResult)> {
        self.group_results
            .iter()
            .flat_map(|group| group.rule_results().iter().map(move |rule| (group.group_name(), rule)))
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for group in &self.group_results {
            summary += group.summary();
        }
        summary
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.group_results.iter().all(GroupResult::is_success)
    }
}
