use super::{Provider, ProviderError};
use crate::model::{
    AssociationDef, AttributeDef, AttributeType, AttributeValue, FunctionDef, Resource, ResourceDef, ResourceDefRef,
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

const LOG_TARGET: &str = " inventory";

/// A provider backed by a JSON inventory file.
///
/// The file holds both the resource type definitions and the resource records:
///
/// ```json
/// {
///   "resource_defs": [
///     {
///       "group": "ec2",
///       "resource": "instance",
///       "attributes": [{ "name": "instance_type", "type": "string" }],
///       "associations": [{ "name": "volumes", "target": "aws:ec2:volume" }]
///     }
///   ],
///   "resources": {
///     "ec2:instance": [
///       { "id": "i-1", "attributes": { "instance_type": "t2.micro" }, "associations": { "volumes": ["vol-1"] } }
///     ]
///   }
/// }
/// ```
///
/// Definitions are read once when the provider is opened. Resource records are re-read on
/// every [`Provider::resources`] call.
#[derive(Debug, Clone)]
pub struct InventoryProvider {
    name: String,
    path: Utf8PathBuf,
    defs: BTreeMap<ResourceDefRef, ResourceDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InventoryDoc {
    #[serde(default)]
    resource_defs: Vec<RawResourceDef>,

    #[serde(default)]
    resources: BTreeMap<String, Vec<RawResource>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResourceDef {
    group: String,
    resource: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    attributes: Vec<RawAttributeDef>,
    #[serde(default)]
    functions: Vec<RawFunctionDef>,
    #[serde(default)]
    associations: Vec<RawAssociationDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttributeDef {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    attr_type: AttributeType,
    #[serde(default)]
    array: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFunctionDef {
    name: String,
    #[serde(default)]
    description: String,
    return_type: AttributeType,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAssociationDef {
    name: String,
    #[serde(default)]
    description: String,
    target: ResourceDefRef,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResource {
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
    #[serde(default)]
    associations: BTreeMap<String, Vec<String>>,
}

impl InventoryProvider {
    /// Open an inventory file and read its resource type definitions.
    pub fn open(name: impl Into<String>, path: impl AsRef<Utf8Path>) -> Result<Self, ProviderError> {
        let name = name.into();
        let path = path.as_ref().to_path_buf();
        let doc = read_doc(&path)?;

        let mut defs = BTreeMap::new();
        for raw in doc.resource_defs {
            let def = build_def(&name, raw)?;
            let _ = defs.insert(def.def_ref().clone(), def);
        }

        log::debug!(target: LOG_TARGET, "Opened inventory '{path}' for provider '{name}' with {} resource type(s)", defs.len());

        Ok(Self { name, path, defs })
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Provider for InventoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_defs(&self) -> Vec<ResourceDef> {
        self.defs.values().cloned().collect()
    }

    fn resource_def(&self, def_ref: &ResourceDefRef) -> Option<ResourceDef> {
        self.defs.get(def_ref).cloned()
    }

    fn resources(&self, def_ref: &ResourceDefRef) -> Result<Vec<Resource>, ProviderError> {
        let Some(def) = self.defs.get(def_ref) else {
            return Err(ProviderError::UnknownResourceType { def_ref: def_ref.clone() });
        };

        let mut doc = read_doc(&self.path)?;
        let records = doc.resources.remove(&def_ref.local_name()).unwrap_or_default();

        log::debug!(target: LOG_TARGET, "Read {} record(s) of type '{def_ref}' from '{}'", records.len(), self.path);

        Ok(records.into_iter().map(|record| to_resource(def, record)).collect())
    }
}

fn read_doc(path: &Utf8Path) -> Result<InventoryDoc, ProviderError> {
    let text = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| ProviderError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn build_def(provider: &str, raw: RawResourceDef) -> Result<ResourceDef, ProviderError> {
    let mut builder = ResourceDef::builder(ResourceDefRef::new(provider, &raw.group, &raw.resource)).description(raw.description);

    for attr in raw.attributes {
        builder = builder.attribute(AttributeDef::new(attr.name, attr.description, attr.attr_type, attr.array));
    }

    for func in raw.functions {
        builder = builder.function(FunctionDef::new(func.name, func.description, func.return_type));
    }

    for assoc in raw.associations {
        builder = builder.association(AssociationDef::new(assoc.name, assoc.description, assoc.target));
    }

    builder.build().map_err(|e| ProviderError::Other(Box::new(e)))
}

fn to_resource(def: &ResourceDef, record: RawResource) -> Resource {
    let attributes = record
        .attributes
        .into_iter()
        .filter_map(|(name, raw)| convert(raw, def.attribute(&name)).map(|value| (name, value)))
        .collect();

    let associations = record
        .associations
        .into_iter()
        .map(|(name, ids)| (name, ids.into_iter().map(Into::into).collect()))
        .collect();

    Resource::with_parts(def.def_ref().clone(), record.id, attributes, associations)
}

/// Convert a raw JSON value according to the attribute's declared type.
///
/// Values that cannot take the declared shape keep their natural JSON shape. `null` is
/// treated as an absent attribute.
fn convert(raw: Value, def: Option<&AttributeDef>) -> Option<AttributeValue> {
    match def {
        Some(def) if def.is_array() => match raw {
            Value::Array(items) => Some(AttributeValue::List(
                items.into_iter().filter_map(|item| convert_scalar(item, def.attr_type())).collect(),
            )),
            other => natural(other),
        },
        Some(def) => convert_scalar(raw, def.attr_type()),
        None => natural(raw),
    }
}

fn convert_scalar(raw: Value, attr_type: AttributeType) -> Option<AttributeValue> {
    match (attr_type, raw) {
        (AttributeType::Date, Value::String(s)) => match DateTime::parse_from_rfc3339(&s) {
            Ok(date) => Some(AttributeValue::Date(date.with_timezone(&Utc))),
            Err(_) => Some(AttributeValue::String(s.into())),
        },
        (AttributeType::Float, Value::Number(n)) => n.as_f64().map(AttributeValue::Float),
        (AttributeType::Reference, Value::Object(map)) => match reference(&map) {
            Some(value) => Some(value),
            None => natural(Value::Object(map)),
        },
        (_, raw) => natural(raw),
    }
}

fn reference(map: &serde_json::Map<String, Value>) -> Option<AttributeValue> {
    let target = map.get("target")?.as_str()?.parse().ok()?;
    let id = map.get("id")?.as_str()?;
    Some(AttributeValue::Reference { target, id: id.into() })
}

fn natural(raw: Value) -> Option<AttributeValue> {
    match raw {
        Value::Null => None,
        Value::Bool(b) => Some(AttributeValue::Boolean(b)),
        Value::Number(n) => n.as_i64().map(AttributeValue::Integer).or_else(|| n.as_f64().map(AttributeValue::Float)),
        Value::String(s) => Some(AttributeValue::String(CompactString::from(s))),
        Value::Array(items) => Some(AttributeValue::List(items.into_iter().filter_map(natural).collect())),
        Value::Object(map) => Some(AttributeValue::Object(
            map.into_iter().filter_map(|(k, v)| natural(v).map(|v| (k, v))).collect(),
        )),
    }
}
