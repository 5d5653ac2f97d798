use super::{LoadReport, LoaderPlan, PlanError, Progress, SkipReason};
use crate::model::{Resource, ResourceDef, ResourceDefRef};
use crate::providers::{Provider, ProviderError, Providers};
use crate::spec::Spec;
use crate::store::ResourceStore;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

const LOG_TARGET: &str = "    loader";

/// Default deadline for a single provider call.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of resource types loaded in parallel.
pub const DEFAULT_LOAD_CONCURRENCY: usize = 4;

/// Populates a resource store from the registered providers.
///
/// Each planned type is fetched by its own blocking task. At most `concurrency` fetches run
/// at once and each one is bounded by `timeout`. A failing type never affects the others.
pub struct Loader {
    providers: Arc<Providers>,
    store: Arc<dyn ResourceStore>,
    timeout: Duration,
    concurrency: usize,
    progress: Option<Arc<dyn Progress>>,
}

impl Debug for Loader {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Loader")
            .field("providers", &self.providers)
            .field("store", &self.store)
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn Progress>"))
            .finish()
    }
}

enum FetchOutcome {
    Fetched(Vec<Resource>),
    Failed(String),
}

impl Loader {
    #[must_use]
    pub fn new(providers: Arc<Providers>, store: Arc<dyn ResourceStore>) -> Self {
        Self {
            providers,
            store,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
            concurrency: DEFAULT_LOAD_CONCURRENCY,
            progress: None,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of types loaded in parallel; zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Load every resource type a specification names.
    pub async fn load(&self, spec: &Spec) -> Result<LoadReport, PlanError> {
        let plan = LoaderPlan::new(spec)?;
        Ok(self.load_plan(&plan).await)
    }

    /// Load every resource type in a plan.
    pub async fn load_plan(&self, plan: &LoaderPlan) -> LoadReport {
        let mut report = LoadReport::default();
        let mut work = Vec::new();

        for def_ref in plan.def_refs() {
            let Some(provider) = self.providers.get(def_ref.provider()) else {
                log::warn!(target: LOG_TARGET, "Skipping '{def_ref}': provider '{}' is not registered", def_ref.provider());
                report.record_skipped(def_ref.clone(), SkipReason::ProviderNotRegistered);
                continue;
            };

            let Some(def) = provider.resource_def(def_ref) else {
                log::warn!(target: LOG_TARGET, "Skipping '{def_ref}': not defined by provider '{}'", provider.name());
                report.record_skipped(def_ref.clone(), SkipReason::TypeNotDefined);
                continue;
            };

            work.push((def, Arc::clone(provider)));
        }

        let total = work.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));
        if let Some(progress) = &self.progress {
            progress.set_phase("Loading");
            let completed = Arc::clone(&completed);
            progress.set_determinate(Box::new(move || {
                let current = completed.load(Ordering::Relaxed);
                (total, current, format!("{current}/{total} resource types"))
            }));
        }

        log::info!(target: LOG_TARGET, "Loading {total} resource type(s)");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let outcomes = join_all(work.into_iter().map(|(def, provider)| {
            let semaphore = Arc::clone(&semaphore);
            let completed = Arc::clone(&completed);
            async move {
                let outcome = self.fetch(semaphore, def.def_ref(), provider).await;
                let _ = completed.fetch_add(1, Ordering::Relaxed);
                (def, outcome)
            }
        }))
        .await;

        for (def, outcome) in outcomes {
            let def_ref = def.def_ref().clone();
            match outcome {
                FetchOutcome::Fetched(resources) => {
                    let count = self.store_resources(&def, resources);
                    log::debug!(target: LOG_TARGET, "Loaded {count} resource(s) of type '{def_ref}'");
                    report.record_loaded(def_ref, count);
                }
                FetchOutcome::Failed(message) => {
                    log::error!(target: LOG_TARGET, "Could not load resources of type '{def_ref}': {message}");
                    report.record_failed(def_ref, message);
                }
            }
        }

        if let Some(progress) = &self.progress {
            progress.done();
        }

        report
    }

    async fn fetch(&self, semaphore: Arc<Semaphore>, def_ref: &ResourceDefRef, provider: Arc<dyn Provider>) -> FetchOutcome {
        let Ok(permit) = semaphore.acquire_owned().await else {
            return FetchOutcome::Failed("loader was shut down".to_string());
        };

        // The permit lives as long as the provider call, even past a timeout
        let task_ref = def_ref.clone();
        let task = tokio::task::spawn_blocking(move || {
            let result = provider.resources(&task_ref);
            drop(permit);
            result
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(resources))) => FetchOutcome::Fetched(resources),
            Ok(Ok(Err(e))) => FetchOutcome::Failed(error_chain(&e)),
            Ok(Err(e)) => FetchOutcome::Failed(format!("provider task failed: {e}")),
            Err(_) => FetchOutcome::Failed(format!("provider did not respond within {}s", self.timeout.as_secs_f64())),
        }
    }

    fn store_resources(&self, def: &ResourceDef, resources: Vec<Resource>) -> usize {
        let mut count = 0;
        for resource in resources {
            if resource.def_ref() != def.def_ref() {
                log::warn!(
                    target: LOG_TARGET,
                    "Discarding resource '{}' of type '{}' returned for type '{}'",
                    resource.id(),
                    resource.def_ref(),
                    def.def_ref()
                );
                continue;
            }

            for (name, value) in resource.attributes() {
                if let Some(attr_def) = def.attribute(name)
                    && !value.conforms_to(attr_def)
                {
                    log::warn!(
                        target: LOG_TARGET,
                        "Resource '{}' of type '{}': attribute '{name}' holds a {} but is declared as {}{}",
                        resource.id(),
                        def.def_ref(),
                        value.type_name(),
                        attr_def.attr_type(),
                        if attr_def.is_array() { " array" } else { "" }
                    );
                }
            }

            self.store.save_resource_with(resource);
            count += 1;
        }

        count
    }
}

fn error_chain(e: &ProviderError) -> String {
    let mut message = e.to_string();
    let mut source = core::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
