use super::Provider;
use crate::model::{ResourceDef, ResourceDefRef};
use std::sync::Arc;

const LOG_TARGET: &str = " providers";

/// The set of registered providers, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Providers {
    providers: Vec<Arc<dyn Provider>>,
}

impl Providers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider.
    ///
    /// A provider with the same name is replaced in place, keeping its registration slot.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        if let Some(slot) = self.providers.iter_mut().find(|p| p.name() == provider.name()) {
            log::debug!(target: LOG_TARGET, "Replacing provider '{}'", provider.name());
            *slot = provider;
        } else {
            log::debug!(target: LOG_TARGET, "Registering provider '{}'", provider.name());
            self.providers.push(provider);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Provider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a type definition through the provider named by the reference
    #[must_use]
    pub fn resource_def(&self, def_ref: &ResourceDefRef) -> Option<ResourceDef> {
        self.get(def_ref.provider())?.resource_def(def_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resource;
    use crate::providers::ProviderError;

    #[derive(Debug)]
    struct FakeProvider {
        name: &'static str,
        types: Vec<&'static str>,
    }

    impl Provider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn resource_defs(&self) -> Vec<ResourceDef> {
            self.types
                .iter()
                .map(|r| ResourceDef::builder(ResourceDefRef::new(self.name, "svc", r)).build().unwrap())
                .collect()
        }

        fn resources(&self, _def_ref: &ResourceDefRef) -> Result<Vec<Resource>, ProviderError> {
            Ok(Vec::new())
        }
    }

    fn fake(name: &'static str, types: Vec<&'static str>) -> Arc<dyn Provider> {
        Arc::new(FakeProvider { name, types })
    }

    #[test]
    fn test_register_and_get() {
        let mut providers = Providers::new();
        assert!(providers.is_empty());

        providers.register(fake("aws", vec!["a"]));
        providers.register(fake("gcp", vec!["b"]));

        assert_eq!(providers.len(), 2);
        assert_eq!(providers.get("aws").unwrap().name(), "aws");
        assert!(providers.get("azure").is_none());
    }

    #[test]
    fn test_register_same_name_replaces_in_place() {
        let mut providers = Providers::new();
        providers.register(fake("aws", vec!["a"]));
        providers.register(fake("gcp", vec!["b"]));
        providers.register(fake("aws", vec!["c"]));

        let names: Vec<_> = providers.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["aws", "gcp"]);

        assert!(providers.resource_def(&ResourceDefRef::new("aws", "svc", "a")).is_none());
        assert!(providers.resource_def(&ResourceDefRef::new("aws", "svc", "c")).is_some());
    }

    #[test]
    fn test_resource_def_routes_by_provider_segment() {
        let mut providers = Providers::new();
        providers.register(fake("aws", vec!["a"]));

        assert!(providers.resource_def(&ResourceDefRef::new("aws", "svc", "a")).is_some());
        assert!(providers.resource_def(&ResourceDefRef::new("gcp", "svc", "a")).is_none());
        assert!(providers.resource_def(&ResourceDefRef::new("aws", "svc", "zzz")).is_none());
    }
}
