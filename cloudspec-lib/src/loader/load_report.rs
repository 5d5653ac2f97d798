use crate::model::ResourceDefRef;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::Display;

/// Why a planned resource type was not loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[strum(to_string = "provider is not registered")]
    ProviderNotRegistered,

    #[strum(to_string = "type is not defined by its provider")]
    TypeNotDefined,
}

/// The per-type outcome of a loading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    loaded: BTreeMap<ResourceDefRef, usize>,
    skipped: BTreeMap<ResourceDefRef, SkipReason>,
    failed: BTreeMap<ResourceDefRef, String>,
}

impl LoadReport {
    pub(crate) fn record_loaded(&mut self, def_ref: ResourceDefRef, count: usize) {
        let _ = self.loaded.insert(def_ref, count);
    }

    pub(crate) fn record_skipped(&mut self, def_ref: ResourceDefRef, reason: SkipReason) {
        let _ = self.skipped.insert(def_ref, reason);
    }

    pub(crate) fn record_failed(&mut self, def_ref: ResourceDefRef, message: String) {
        let _ = self.failed.insert(def_ref, message);
    }

    /// Number of resources stored for a type, if it loaded successfully
    #[must_use]
    pub fn loaded_count(&self, def_ref: &ResourceDefRef) -> Option<usize> {
        self.loaded.get(def_ref).copied()
    }

    #[must_use]
    pub fn skip_reason(&self, def_ref: &ResourceDefRef) -> Option<SkipReason> {
        self.skipped.get(def_ref).copied()
    }

    /// The error message recorded for a type whose load failed
    #[must_use]
    pub fn failure(&self, def_ref: &ResourceDefRef) -> Option<&str> {
        self.failed.get(def_ref).map(String::as_str)
    }

    pub fn loaded(&self) -> impl Iterator<Item = (&ResourceDefRef, usize)> {
        self.loaded.iter().map(|(def_ref, count)| (def_ref, *count))
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&ResourceDefRef, SkipReason)> {
        self.skipped.iter().map(|(def_ref, reason)| (def_ref, *reason))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ResourceDefRef, &str)> {
        self.failed.iter().map(|(def_ref, message)| (def_ref, message.as_str()))
    }

    #[must_use]
    pub fn total_resources(&self) -> usize {
        self.loaded.values().sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
