//! The resource type model
//!
//! Resource types are identified by a [`ResourceDefRef`], a `provider:group:resource`
//! triple whose canonical string form is the type's fully-qualified name. Providers
//! describe each type they offer with a [`ResourceDef`], which declares the type's
//! attributes ([`AttributeDef`]), functions ([`FunctionDef`]), and associations to
//! other types ([`AssociationDef`]).
//!
//! # Implementation Model
//!
//! Loaded instances are [`Resource`] values holding a map of typed
//! [`AttributeValue`]s and a map of association names to referenced ids. Attribute
//! values are a closed tagged union so that evaluators can match on them and report
//! typed mismatches. Associations are weak: they hold ids and are resolved through the
//! resource store on demand, so resources never own each other.

mod association_def;
mod attribute_def;
mod attribute_type;
mod attribute_value;
mod function_def;
mod resource;
mod resource_def;
mod resource_def_ref;

pub use association_def::AssociationDef;
pub use attribute_def::AttributeDef;
pub use attribute_type::AttributeType;
pub use attribute_value::AttributeValue;
pub use function_def::FunctionDef;
pub use resource::Resource;
pub use resource_def::{DefinitionError, ResourceDef, ResourceDefBuilder};
pub use resource_def_ref::{FQ_NAME_SEPARATOR, ParseRefError, ResourceDefRef};

/// Identifier of a resource, unique within its resource type.
pub type ResourceId = std::sync::Arc<str>;
