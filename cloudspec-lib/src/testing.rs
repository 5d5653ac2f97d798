//! Shared fixtures for unit tests

use crate::model::{AttributeDef, AttributeType, Resource, ResourceDef, ResourceDefRef};
use crate::providers::{Provider, ProviderError, Providers};
use core::time::Duration;
use std::collections::BTreeSet;
use std::sync::Arc;

/// An in-memory provider with canned definitions and resources.
#[derive(Debug, Default)]
pub struct StaticProvider {
    name: String,
    defs: Vec<ResourceDef>,
    resources: Vec<Resource>,
    failing: BTreeSet<ResourceDefRef>,
    delay: Option<Duration>,
}

impl StaticProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_def(mut self, def: ResourceDef) -> Self {
        self.defs.push(def);
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn failing(mut self, def_ref: ResourceDefRef) -> Self {
        let _ = self.failing.insert(def_ref);
        self
    }

    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_defs(&self) -> Vec<ResourceDef> {
        self.defs.clone()
    }

    fn resources(&self, def_ref: &ResourceDefRef) -> Result<Vec<Resource>, ProviderError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if self.failing.contains(def_ref) {
            return Err(ProviderError::Other("connection reset".into()));
        }

        if !self.defs.iter().any(|def| def.def_ref() == def_ref) {
            return Err(ProviderError::UnknownResourceType { def_ref: def_ref.clone() });
        }

        Ok(self.resources.iter().filter(|r| r.def_ref() == def_ref).cloned().collect())
    }
}

pub fn instance_ref() -> ResourceDefRef {
    ResourceDefRef::new("aws", "ec2", "instance")
}

pub fn bucket_ref() -> ResourceDefRef {
    ResourceDefRef::new("aws", "s3", "bucket")
}

pub fn instance_def() -> ResourceDef {
    ResourceDef::builder(instance_ref())
        .attribute(AttributeDef::new("instance_type", "Instance size", AttributeType::String, false))
        .attribute(AttributeDef::new("region", "Region", AttributeType::String, false))
        .attribute(AttributeDef::new("encrypted", "Root volume encryption", AttributeType::Boolean, false))
        .attribute(AttributeDef::new("tags", "Tags", AttributeType::String, true))
        .build()
        .unwrap()
}

pub fn bucket_def() -> ResourceDef {
    ResourceDef::builder(bucket_ref())
        .attribute(AttributeDef::new("versioning", "Versioning enabled", AttributeType::Boolean, false))
        .build()
        .unwrap()
}

/// An `aws` provider defining `ec2:instance` and `s3:bucket`, without resources
pub fn aws_provider() -> StaticProvider {
    StaticProvider::new("aws").with_def(instance_def()).with_def(bucket_def())
}

pub fn instance(id: &str, instance_type: &str) -> Resource {
    Resource::new(instance_ref(), id).with_attribute("instance_type", instance_type)
}

pub fn registry(providers: impl IntoIterator<Item = StaticProvider>) -> Arc<Providers> {
    let mut registry = Providers::new();
    for provider in providers {
        registry.register(Arc::new(provider));
    }
    Arc::new(registry)
}
