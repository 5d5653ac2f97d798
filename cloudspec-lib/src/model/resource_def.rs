use super::{AssociationDef, AttributeDef, FunctionDef, ResourceDefRef};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// A resource type definition that declares the same name twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("resource type '{def_ref}' declares attribute '{name}' more than once")]
    DuplicateAttribute { def_ref: ResourceDefRef, name: String },

    #[error("resource type '{def_ref}' declares function '{name}' more than once")]
    DuplicateFunction { def_ref: ResourceDefRef, name: String },

    #[error("resource type '{def_ref}' declares association '{name}' more than once")]
    DuplicateAssociation { def_ref: ResourceDefRef, name: String },
}

/// The schema of a resource type: its attributes, functions, and associations.
///
/// Definitions are built once when a provider registers and are immutable afterwards.
/// Members are kept ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDef {
    def_ref: ResourceDefRef,
    description: Arc<str>,
    attributes: BTreeMap<Arc<str>, AttributeDef>,
    functions: BTreeMap<Arc<str>, FunctionDef>,
    associations: BTreeMap<Arc<str>, AssociationDef>,
}

impl ResourceDef {
    #[must_use]
    pub fn builder(def_ref: ResourceDefRef) -> ResourceDefBuilder {
        ResourceDefBuilder {
            def_ref,
            description: String::new(),
            attributes: Vec::new(),
            functions: Vec::new(),
            associations: Vec::new(),
        }
    }

    #[must_use]
    pub const fn def_ref(&self) -> &ResourceDefRef {
        &self.def_ref
    }

    #[must_use]
    pub fn fq_name(&self) -> String {
        self.def_ref.fq_name()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.get(name)
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    #[must_use]
    pub fn association(&self, name: &str) -> Option<&AssociationDef> {
        self.associations.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDef> {
        self.attributes.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }

    pub fn associations(&self) -> impl Iterator<Item = &AssociationDef> {
        self.associations.values()
    }
}

/// Collects the members of a [`ResourceDef`] and checks name uniqueness on [`build`](Self::build).
#[derive(Debug)]
pub struct ResourceDefBuilder {
    def_ref: ResourceDefRef,
    description: String,
    attributes: Vec<AttributeDef>,
    functions: Vec<FunctionDef>,
    associations: Vec<AssociationDef>,
}

impl ResourceDefBuilder {
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn attribute(mut self, def: AttributeDef) -> Self {
        self.attributes.push(def);
        self
    }

    #[must_use]
    pub fn function(mut self, def: FunctionDef) -> Self {
        self.functions.push(def);
        self
    }

    #[must_use]
    pub fn association(mut self, def: AssociationDef) -> Self {
        self.associations.push(def);
        self
    }

    pub fn build(self) -> Result<ResourceDef, DefinitionError> {
        let mut attributes = BTreeMap::new();
        for def in self.attributes {
            let name: Arc<str> = Arc::from(def.name());
            if attributes.insert(Arc::clone(&name), def).is_some() {
                return Err(DefinitionError::DuplicateAttribute {
                    def_ref: self.def_ref,
                    name: name.to_string(),
                });
            }
        }

        let mut functions = BTreeMap::new();
        for def in self.functions {
            let name: Arc<str> = Arc::from(def.name());
            if functions.insert(Arc::clone(&name), def).is_some() {
                return Err(DefinitionError::DuplicateFunction {
                    def_ref: self.def_ref,
                    name: name.to_string(),
                });
            }
        }

        let mut associations = BTreeMap::new();
        for def in self.associations {
            let name: Arc<str> = Arc::from(def.name());
            if associations.insert(Arc::clone(&name), def).is_some() {
                return Err(DefinitionError::DuplicateAssociation {
                    def_ref: self.def_ref,
                    name: name.to_string(),
                });
            }
        }

        Ok(ResourceDef {
            def_ref: self.def_ref,
            description: Arc::from(self.description),
            attributes,
            functions,
            associations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttributeType;

    fn instance_ref() -> ResourceDefRef {
        ResourceDefRef::new("aws", "ec2", "instance")
    }

    #[test]
    fn test_lookup_by_name() {
        let def = ResourceDef::builder(instance_ref())
            .description("EC2 instance")
            .attribute(AttributeDef::new("instance_type", "Instance size", AttributeType::String, false))
            .attribute(AttributeDef::new("encrypted", "", AttributeType::Boolean, false))
            .function(FunctionDef::new("age_days", "", AttributeType::Integer))
            .association(AssociationDef::new("volumes", "", ResourceDefRef::new("aws", "ec2", "volume")))
            .build()
            .unwrap();

        assert_eq!(def.fq_name(), "aws:ec2:instance");
        assert_eq!(def.description(), "EC2 instance");
        assert_eq!(def.attribute("instance_type").unwrap().attr_type(), AttributeType::String);
        assert!(def.attribute("missing").is_none());
        assert!(def.function("age_days").is_some());
        assert!(def.function("instance_type").is_none());
        assert_eq!(def.association("volumes").unwrap().target().resource(), "volume");
        assert!(def.association("subnets").is_none());
    }

    #[test]
    fn test_attributes_are_ordered_by_name() {
        let def = ResourceDef::builder(instance_ref())
            .attribute(AttributeDef::new("zone", "", AttributeType::String, false))
            .attribute(AttributeDef::new("arn", "", AttributeType::String, false))
            .attribute(AttributeDef::new("encrypted", "", AttributeType::Boolean, false))
            .build()
            .unwrap();

        let names: Vec<_> = def.attributes().map(AttributeDef::name).collect();
        assert_eq!(names, vec!["arn", "encrypted", "zone"]);
    }

    #[test]
    fn test_duplicate_attribute_is_rejected() {
        let err = ResourceDef::builder(instance_ref())
            .attribute(AttributeDef::new("zone", "", AttributeType::String, false))
            .attribute(AttributeDef::new("zone", "", AttributeType::Integer, false))
            .build()
            .unwrap_err();

        assert!(matches!(err, DefinitionError::DuplicateAttribute { ref name, .. } if name == "zone"));
    }

    #[test]
    fn test_duplicate_association_is_rejected() {
        let target = ResourceDefRef::new("aws", "ec2", "volume");
        let err = ResourceDef::builder(instance_ref())
            .association(AssociationDef::new("volumes", "", target.clone()))
            .association(AssociationDef::new("volumes", "", target))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("association 'volumes'"));
    }
}
