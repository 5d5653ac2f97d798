use super::{AssertExpr, FilterExpr};
use crate::model::{ParseRefError, ResourceDefRef};
use serde::{Deserialize, Serialize};

/// A named assertion unit bound to one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    title: String,

    #[serde(rename = "resource")]
    resource_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    filters: Vec<FilterExpr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    asserts: Vec<AssertExpr>,
}

impl Rule {
    #[must_use]
    pub fn new(title: impl Into<String>, resource_type: impl Into<String>, filters: Vec<FilterExpr>, asserts: Vec<AssertExpr>) -> Self {
        Self {
            title: title.into(),
            resource_type: resource_type.into(),
            filters,
            asserts,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The fully-qualified name of the resource type, as written
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Parse the resource type into a [`ResourceDefRef`]
    pub fn resource_def_ref(&self) -> Result<ResourceDefRef, ParseRefError> {
        self.resource_type.parse()
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterExpr] {
        &self.filters
    }

    #[must_use]
    pub fn asserts(&self) -> &[AssertExpr] {
        &self.asserts
    }

    /// Attribute names referenced by filters, then asserts, in declaration order
    pub fn referenced_attributes(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(FilterExpr::attribute)
            .chain(self.asserts.iter().map(AssertExpr::attribute))
    }
}
