use super::{AttributeDef, AttributeType, ResourceDefRef, ResourceId};
use chrono::{DateTime, SecondsFormat, Utc};
use compact_str::CompactString;
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A typed attribute value held by a [`Resource`](super::Resource) or expected by an evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(CompactString),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    List(Vec<Self>),
    Object(BTreeMap<String, Self>),

    /// A weak reference to another resource, resolved through the store on demand.
    Reference { target: ResourceDefRef, id: ResourceId },
}

impl AttributeValue {
    /// Short name of the value's tag, used in diagnostics
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Reference { .. } => "reference",
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this value matches the declared type of an attribute.
    ///
    /// Array attributes require a list whose every element matches the scalar type.
    /// Integers conform to float attributes.
    #[must_use]
    pub fn conforms_to(&self, def: &AttributeDef) -> bool {
        if def.is_array() {
            return match self {
                Self::List(items) => items.iter().all(|item| item.conforms_to_scalar(def.attr_type())),
                _ => false,
            };
        }

        self.conforms_to_scalar(def.attr_type())
    }

    fn conforms_to_scalar(&self, attr_type: AttributeType) -> bool {
        matches!(
            (self, attr_type),
            (Self::String(_), AttributeType::String)
                | (Self::Integer(_), AttributeType::Integer | AttributeType::Float)
                | (Self::Float(_), AttributeType::Float)
                | (Self::Boolean(_), AttributeType::Boolean)
                | (Self::Date(_), AttributeType::Date)
                | (Self::Object(_), AttributeType::Object)
                | (Self::Reference { .. }, AttributeType::Reference)
        )
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Date(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(fields) => {
                write!(f, "{{")?;
                for (index, (key, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::Reference { target, id } => write!(f, "{target}/{id}"),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Date(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Reference { target, id } => {
                let mut state = serializer.serialize_struct("Reference", 2)?;
                state.serialize_field("type", target)?;
                state.serialize_field("id", id.as_ref())?;
                state.end()
            }
        }
    }
}

/// Values decode from their natural shape; dates and references have no self-describing form
/// and stay strings or objects until a provider converts them against an [`AttributeDef`].
impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("a string, number, boolean, array, or table")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AttributeValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(AttributeValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AttributeValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AttributeValue::String(v.into()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(AttributeValue::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, AttributeValue>()? {
            let _ = fields.insert(key, value);
        }
        Ok(AttributeValue::Object(fields))
    }
}
