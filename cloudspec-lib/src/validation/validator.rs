use super::{AssertionFailure, GroupResult, RuleFault, RuleResult, SpecResult};
use crate::loader::LoadReport;
use crate::expr::Evaluator;
use crate::model::{AttributeValue, Resource};
use crate::spec::{Group, Rule, Spec};
use crate::store::ResourceStore;

const LOG_TARGET: &str = "validation";

/// Evaluates a specification against the resources held by a store.
///
/// The specification is assumed to have passed preflight. Validation is synchronous and
/// depth-first; every rule reaches a terminal status, and a fault in one rule never stops
/// its siblings from being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    store: &'a dyn ResourceStore,
    load_report: Option<&'a LoadReport>,
}

#[derive(Debug)]
enum RuleState {
    Pending,
    Filtering(Vec<Resource>),
    Asserting(Vec<Resource>),
    Done(RuleResult),
}

impl<'a> Validator<'a> {
    #[must_use]
    pub const fn new(store: &'a dyn ResourceStore) -> Self {
        Self { store, load_report: None }
    }

    /// Consult a load report so rules over types that failed to load are reported as errored.
    #[must_use]
    pub const fn with_load_report(mut self, load_report: &'a LoadReport) -> Self {
        self.load_report = Some(load_report);
        self
    }

    #[must_use]
    pub fn validate(&self, spec: &Spec) -> SpecResult {
        log::info!(target: LOG_TARGET, "Validating specification '{}'", spec.name());

        let groups = spec.groups().iter().map(|group| self.validate_group(group)).collect();
        let result = SpecResult::new(spec.name(), groups);

        let summary = result.summary();
        log::info!(
            target: LOG_TARGET,
            "Specification '{}': {} passed, {} failed, {} errored",
            spec.name(),
            summary.passed,
            summary.failed,
            summary.errored
        );

        result
    }

    fn validate_group(&self, group: &Group) -> GroupResult {
        let rules = group.rules().iter().map(|rule| self.validate_rule(rule)).collect();
        GroupResult::new(group.name(), rules)
    }

    #[must_use]
    pub fn validate_rule(&self, rule: &Rule) -> RuleResult {
        let mut state = RuleState::Pending;
        loop {
            state = match state {
                RuleState::Pending => self.candidates(rule),
                RuleState::Filtering(candidates) => filter_candidates(rule, candidates),
                RuleState::Asserting(selected) => assert_selected(rule, &selected),
                RuleState::Done(result) => {
                    log::debug!(target: LOG_TARGET, "Rule '{}' {}", rule.title(), result.status());
                    return result;
                }
            };
        }
    }

    fn candidates(&self, rule: &Rule) -> RuleState {
        let Ok(def_ref) = rule.resource_def_ref() else {
            return errored(
                rule,
                RuleFault::UnresolvedType {
                    reference: rule.resource_type().to_string(),
                },
            );
        };

        if let Some(message) = self.load_report.and_then(|report| report.failure(&def_ref)) {
            return errored(
                rule,
                RuleFault::LoadFailed {
                    message: message.to_string(),
                    def_ref,
                },
            );
        }

        let candidates = self.store.resources_by_definition(&def_ref);
        if candidates.is_empty() {
            log::debug!(target: LOG_TARGET, "Rule '{}': no resources of type '{def_ref}'", rule.title());
            return RuleState::Done(RuleResult::succeeded(rule.title(), rule.resource_type()));
        }

        RuleState::Filtering(candidates)
    }
}

fn filter_candidates(rule: &Rule, candidates: Vec<Resource>) -> RuleState {
    let total = candidates.len();
    let mut selected = Vec::with_capacity(total);

    'candidates: for resource in candidates {
        for expr in rule.filters() {
            match check(&resource, expr.attribute(), expr.evaluator()) {
                Ok((true, _)) => {}
                Ok((false, _)) => continue 'candidates,
                Err(fault) => return errored(rule, fault),
            }
        }
        selected.push(resource);
    }

    log::trace!(target: LOG_TARGET, "Rule '{}': {} of {total} resource(s) selected", rule.title(), selected.len());
    RuleState::Asserting(selected)
}

fn assert_selected(rule: &Rule, selected: &[Resource]) -> RuleState {
    let mut failures = Vec::new();
    let mut failed_resources = 0;

    for resource in selected {
        let mut resource_failed = false;
        for expr in rule.asserts() {
            match check(resource, expr.attribute(), expr.evaluator()) {
                Ok((true, _)) => {}
                Ok((false, actual)) => {
                    resource_failed = true;
                    failures.push(AssertionFailure {
                        resource_id: resource.id().to_string(),
                        attribute: expr.attribute().to_string(),
                        actual: actual.clone(),
                        expected: expr.evaluator().to_string(),
                    });
                }
                Err(fault) => return errored(rule, fault),
            }
        }

        if resource_failed {
            failed_resources += 1;
        }
    }

    let result = if failures.is_empty() {
        RuleResult::succeeded(rule.title(), rule.resource_type())
    } else {
        let reason = format!("{failed_resources} of {} resource(s) failed assertions", selected.len());
        RuleResult::failed(rule.title(), rule.resource_type(), reason, failures)
    };

    RuleState::Done(result)
}

/// Evaluate one expression against a resource, returning the verdict and the value it saw
fn check<'r>(resource: &'r Resource, attribute: &str, evaluator: &Evaluator) -> Result<(bool, &'r AttributeValue), RuleFault> {
    let value = resource.attribute(attribute).ok_or_else(|| RuleFault::MissingAttribute {
        resource_id: resource.id().to_string(),
        attribute: attribute.to_string(),
    })?;

    let verdict = evaluator.eval(value).map_err(|source| RuleFault::Evaluation {
        resource_id: resource.id().to_string(),
        attribute: attribute.to_string(),
        source,
    })?;

    Ok((verdict, value))
}

fn errored(rule: &Rule, fault: RuleFault) -> RuleState {
    log::debug!(target: LOG_TARGET, "Rule '{}' errored: {fault}", rule.title());
    RuleState::Done(RuleResult::errored(rule.title(), rule.resource_type(), fault))
}
