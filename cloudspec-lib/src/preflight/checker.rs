use super::PreflightError;
use crate::model::ResourceDefRef;
use crate::providers::Providers;
use crate::spec::{Group, Rule, Spec};

const LOG_TARGET: &str = " preflight";

/// Check every reference in a specification, stopping at the first failure.
///
/// No resources are fetched; only provider definitions are consulted.
pub fn preflight(spec: &Spec, providers: &Providers) -> Result<(), PreflightError> {
    for (group, rule) in spec.rules() {
        if let Some(e) = check_rule(group, rule, providers).into_iter().next() {
            log::debug!(target: LOG_TARGET, "Specification '{}' failed preflight: {e}", spec.name());
            return Err(e);
        }
    }

    log::debug!(target: LOG_TARGET, "Specification '{}' passed preflight", spec.name());
    Ok(())
}

/// Check every reference in a specification and return every failure, in declaration order.
#[must_use]
pub fn preflight_all(spec: &Spec, providers: &Providers) -> Vec<PreflightError> {
    let errors: Vec<_> = spec
        .rules()
        .flat_map(|(group, rule)| check_rule(group, rule, providers))
        .collect();

    log::debug!(target: LOG_TARGET, "Specification '{}' has {} preflight error(s)", spec.name(), errors.len());
    errors
}

fn check_rule(group: &Group, rule: &Rule, providers: &Providers) -> Vec<PreflightError> {
    let unresolved = || PreflightError::UnresolvedReference {
        group: group.name().to_string(),
        rule: rule.title().to_string(),
        reference: rule.resource_type().to_string(),
    };

    let Ok(def_ref) = rule.resource_def_ref() else {
        return vec![unresolved()];
    };

    let Some(provider) = providers.get(def_ref.provider()) else {
        return vec![unresolved()];
    };

    let Some(def) = provider.resource_def(&def_ref) else {
        return vec![PreflightError::UnknownResourceType {
            group: group.name().to_string(),
            rule: rule.title().to_string(),
            def_ref,
        }];
    };

    rule.referenced_attributes()
        .filter(|name| def.attribute(name).is_none())
        .map(|name| unknown_attribute(group, rule, &def_ref, name))
        .collect()
}

fn unknown_attribute(group: &Group, rule: &Rule, def_ref: &ResourceDefRef, attribute: &str) -> PreflightError {
    PreflightError::UnknownAttribute {
        group: group.name().to_string(),
        rule: rule.title().to_string(),
        def_ref: def_ref.clone(),
        attribute: attribute.to_string(),
    }
}
