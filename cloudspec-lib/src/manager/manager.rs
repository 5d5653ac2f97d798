use super::ManagerError;
use crate::loader::{DEFAULT_LOAD_CONCURRENCY, DEFAULT_PROVIDER_TIMEOUT, LoadReport, Loader, Progress};
use crate::preflight::preflight;
use crate::providers::Providers;
use crate::spec::Spec;
use crate::store::ResourceStore;
use crate::validation::{SpecResult, Validator};
use core::fmt::{Debug, Formatter};
use core::time::Duration;
use std::sync::Arc;

const LOG_TARGET: &str = "   manager";

/// Sequences a validation run: init, preflight, load, validate.
pub struct Manager {
    providers: Arc<Providers>,
    store: Arc<dyn ResourceStore>,
    timeout: Duration,
    concurrency: usize,
    progress: Option<Arc<dyn Progress>>,
    initiated: bool,
    load_report: Option<LoadReport>,
}

impl Debug for Manager {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Manager")
            .field("providers", &self.providers)
            .field("store", &self.store)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .field("initiated", &self.initiated)
            .field("load_report", &self.load_report)
            .finish_non_exhaustive()
    }
}

impl Manager {
    #[must_use]
    pub fn new(providers: Arc<Providers>, store: Arc<dyn ResourceStore>) -> Self {
        Self {
            providers,
            store,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            concurrency: DEFAULT_LOAD_CONCURRENCY,
            progress: None,
            initiated: false,
            load_report: None,
        }
    }

    /// Set the per-call provider deadline and the number of types loaded in parallel.
    #[must_use]
    pub const fn with_load_limits(mut self, timeout: Duration, concurrency: usize) -> Self {
        self.timeout = timeout;
        self.concurrency = concurrency;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    #[must_use]
    pub const fn providers(&self) -> &Arc<Providers> {
        &self.providers
    }

    /// The report of the most recent loading pass
    #[must_use]
    pub const fn load_report(&self) -> Option<&LoadReport> {
        self.load_report.as_ref()
    }

    /// Import every registered provider's resource definitions into the store.
    pub fn init(&mut self) -> Result<(), ManagerError> {
        if self.initiated {
            return Err(ManagerError::AlreadyInitiated);
        }

        let mut count = 0;
        for provider in self.providers.iter() {
            for def in provider.resource_defs() {
                self.store.save_definition(def);
                count += 1;
            }
        }

        log::info!(target: LOG_TARGET, "Imported {count} resource definition(s) from {} provider(s)", self.providers.len());

        self.initiated = true;
        Ok(())
    }

    pub fn preflight(&self, spec: &Spec) -> Result<(), ManagerError> {
        self.ensure_initiated()?;
        preflight(spec, &self.providers)?;
        Ok(())
    }

    /// Load every resource type the specification needs, replacing the previous load report.
    pub async fn load_resources(&mut self, spec: &Spec) -> Result<&LoadReport, ManagerError> {
        self.ensure_initiated()?;

        let mut loader = Loader::new(Arc::clone(&self.providers), Arc::clone(&self.store))
            .with_timeout(self.timeout)
            .with_concurrency(self.concurrency);
        if let Some(progress) = &self.progress {
            loader = loader.with_progress(Arc::clone(progress));
        }

        let report = loader.load(spec).await?;
        log::info!(
            target: LOG_TARGET,
            "Loaded {} resource(s); {} type(s) skipped, {} failed",
            report.total_resources(),
            report.skipped().count(),
            report.failed().count()
        );

        Ok(self.load_report.insert(report))
    }

    /// Validate a specification against the loaded resources.
    ///
    /// Preflight runs again first. Rules over types that failed in the last loading pass
    /// are reported as errored.
    pub fn validate(&self, spec: &Spec) -> Result<SpecResult, ManagerError> {
        self.preflight(spec)?;

        let mut validator = Validator::new(self.store.as_ref());
        if let Some(report) = &self.load_report {
            validator = validator.with_load_report(report);
        }

        Ok(validator.validate(spec))
    }

    const fn ensure_initiated(&self) -> Result<(), ManagerError> {
        if self.initiated { Ok(()) } else { Err(ManagerError::NotInitiated) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceDefRef;
    use crate::preflight::PreflightError;
    use crate::spec::compile;
    use crate::store::MemoryStore;
    use crate::testing::{aws_provider, instance, instance_ref, registry};
    use crate::validation::{RuleFault, RuleStatus};

    const SPEC: &str = r#"
name = "S1"
[[groups]]
name = "G1"
[[groups.rules]]
title = "R1"
resource = "aws:ec2:instance"
asserts = [{ attribute = "instance_type", op = "equal", value = "t2.micro" }]
"#;

    fn manager() -> Manager {
        let provider = aws_provider()
            .with_resource(instance("i-1", "t2.micro"))
            .with_resource(instance("i-2", "m5.large"));
        Manager::new(registry([provider]), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_full_run() {
        let mut manager = manager();
        let spec = compile(SPEC).unwrap();

        manager.init().unwrap();
        assert!(manager.store().definition(&instance_ref()).is_some());

        manager.preflight(&spec).unwrap();
        let report = manager.load_resources(&spec).await.unwrap();
        assert_eq!(report.loaded_count(&instance_ref()), Some(2));

        let result = manager.validate(&spec).unwrap();
        let rule = &result.group_results()[0].rule_results()[0];
        assert_eq!(rule.status(), RuleStatus::Failed);
        assert_eq!(rule.failures()[0].resource_id, "i-2");
    }

    #[tokio::test]
    async fn test_operations_require_init() {
        let mut manager = manager();
        let spec = compile(SPEC).unwrap();

        assert_eq!(manager.preflight(&spec), Err(ManagerError::NotInitiated));
        assert_eq!(manager.load_resources(&spec).await.unwrap_err(), ManagerError::NotInitiated);
        assert_eq!(manager.validate(&spec).unwrap_err(), ManagerError::NotInitiated);
    }

    #[test]
    fn test_init_twice_fails() {
        let mut manager = manager();
        manager.init().unwrap();
        assert_eq!(manager.init(), Err(ManagerError::AlreadyInitiated));
    }

    #[test]
    fn test_validate_reruns_preflight() {
        let mut manager = manager();
        manager.init().unwrap();

        let spec = compile(&SPEC.replace("aws:ec2:instance", "aws:ec2:volume")).unwrap();
        let err = manager.validate(&spec).unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Preflight(PreflightError::UnknownResourceType { ref def_ref, .. })
                if *def_ref == ResourceDefRef::new("aws", "ec2", "volume")
        ));
    }

    #[tokio::test]
    async fn test_failed_load_is_reported_as_errored() {
        let provider = aws_provider().failing(instance_ref());
        let mut manager = Manager::new(registry([provider]), Arc::new(MemoryStore::new()))
            .with_load_limits(core::time::Duration::from_secs(5), 2);
        let spec = compile(SPEC).unwrap();

        manager.init().unwrap();
        let _ = manager.load_resources(&spec).await.unwrap();
        assert!(manager.load_report().unwrap().has_failures());

        let result = manager.validate(&spec).unwrap();
        let rule = &result.group_results()[0].rule_results()[0];
        assert!(rule.error());
        assert!(matches!(rule.cause(), Some(RuleFault::LoadFailed { .. })));
    }

    #[test]
    fn test_validate_without_load_sees_empty_store() {
        let mut manager = manager();
        manager.init().unwrap();

        let result = manager.validate(&compile(SPEC).unwrap()).unwrap();
        assert!(result.is_success());
    }
}
